pub mod validator;
pub mod store;
pub mod completion;
