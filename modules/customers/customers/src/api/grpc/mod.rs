mod error;
mod server;

pub use server::CustomerServiceImpl;
