pub mod adapter;
pub mod error;
pub mod image_ops;
pub mod intake;
pub mod request;
pub mod result;
pub mod upstream;
