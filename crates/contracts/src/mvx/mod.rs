pub use call::CallData;
pub use endpoint::{EndpointDefinition, ParameterDefinition};
pub use serializer::ArgSerializer;

mod call;
mod endpoint;
mod serializer;
