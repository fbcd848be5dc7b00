use std::sync::Arc;

use crate::types::{ItemCategory, Policy, PolicyItem};


pub(crate) fn item(users: &[&str], groups: &[&str], accesses: &[&str]) -> PolicyItem {
    PolicyItem::new()
        .with_users(users)
        .with_groups(groups)
        .with_accesses(accesses)
}

pub(crate) fn policy_with(items: Vec<(ItemCategory, PolicyItem)>) -> Policy {
    items
        .into_iter()
        .fold(Policy::new(), |policy, (category, item)| policy.with_item(category, item))
}

#[derive(Clone)]
pub(crate) struct SharedLogBuffer(pub(crate) Arc<std::sync::Mutex<Vec<u8>>>);

pub(crate) struct SharedLogWriter(Arc<std::sync::Mutex<Vec<u8>>>);

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogBuffer {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter(Arc::clone(&self.0))
    }
}

impl std::io::Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
