//! Test infrastructure


pub(crate) use db::TestDb;
