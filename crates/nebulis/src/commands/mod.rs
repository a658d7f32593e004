pub mod build;
pub mod deploy;
pub mod publish;
pub mod validate;
