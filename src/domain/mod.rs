pub mod session;
pub mod speech;
