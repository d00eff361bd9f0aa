//! Scripted transport for unit tests

use heapless::{String, Vec};
use teseo_protocol::RawReply;

use crate::transport::Transport;

/// One call made on the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Write(String<48>),
    Read,
    Reset,
}

impl Op {
    pub fn write(text: &str) -> Self {
        let mut s = String::new();
        s.push_str(text).unwrap();
        Op::Write(s)
    }
}

/// Transport that replays canned replies and logs every call
pub struct MockTransport {
    replies: Vec<&'static str, 8>,
    next_reply: usize,
    pub ops: Vec<Op, 16>,
    pub fail_writes: bool,
    pub has_reset: bool,
}

impl MockTransport {
    pub fn with_replies(replies: &[&'static str]) -> Self {
        Self {
            replies: Vec::from_slice(replies).unwrap(),
            next_reply: 0,
            ops: Vec::new(),
            fail_writes: false,
            has_reset: true,
        }
    }

    pub fn writes(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            Op::Write(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn count(&self, wanted: &Op) -> usize {
        self.ops.iter().filter(|op| *op == wanted).count()
    }
}

impl Transport for MockTransport {
    type Error = ();

    fn write(&mut self, command: &str) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.ops.push(Op::write(command)).unwrap();
        Ok(())
    }

    fn read(&mut self, reply: &mut RawReply) -> Result<(), ()> {
        self.ops.push(Op::Read).unwrap();
        if let Some(text) = self.replies.get(self.next_reply) {
            reply.push_str(text).unwrap();
            self.next_reply += 1;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<(), ()> {
        self.ops.push(Op::Reset).unwrap();
        Ok(())
    }

    fn can_reset(&self) -> bool {
        self.has_reset
    }
}
