pub mod request;

pub use request::GenerateMcqRequest;
