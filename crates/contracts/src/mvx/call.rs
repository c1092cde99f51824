use std::fmt;
use mvxabi::TypedValue;
use crate::mvx::{ArgSerializer, EndpointDefinition};
use crate::Error;

/// Function name plus raw argument tokens of a contract call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallData {
    pub function: String,
    pub arguments: Vec<Vec<u8>>,
}

impl CallData {
    pub fn new(function: &str, arguments: Vec<Vec<u8>>) -> Self {
        Self {
            function: function.to_string(),
            arguments,
        }
    }

    /// Splits `name@hex@hex...`. A trailing `@` is an empty argument.
    pub fn parse(data: &str) -> Result<Self, Error> {
        let mut tokens = data.split('@');
        let function = match tokens.next() {
            Some(function) if !function.is_empty() => function,
            _ => return Err(Error::InvalidCallData(format!("missing function name in `{}`", data))),
        };

        let arguments = tokens
            .enumerate()
            .map(|(index, token)| {
                hex::decode(token).map_err(|err| Error::ArgumentDecode { index, cause: err.into() })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self::new(function, arguments))
    }

    /// Decodes the arguments against the inputs of `endpoint`, which must
    /// be the called function.
    pub fn decode_arguments(&self, endpoint: &EndpointDefinition) -> Result<Vec<TypedValue>, Error> {
        if endpoint.name != self.function {
            return Err(Error::UnknownEndpoint(self.function.clone()));
        }
        ArgSerializer::new().buffers_to_values(&self.arguments, endpoint.inputs())
    }
}

impl fmt::Display for CallData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function)?;
        for argument in self.arguments.iter() {
            write!(f, "@{}", hex::encode(argument))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mvxabi::Value;
    use crate::mvx::ParameterDefinition;
    use super::*;

    #[test]
    fn test_parse_call_data() {
        let call = CallData::parse("swapTokensFixedInput@5745474c442d626434643739@64").unwrap();
        assert_eq!(call.function, "swapTokensFixedInput");
        assert_eq!(call.arguments, vec![b"WEGLD-bd4d79".to_vec(), vec![0x64]]);
        assert_eq!(call.to_string(), "swapTokensFixedInput@5745474c442d626434643739@64");
    }

    #[test]
    fn test_parse_edge_cases() {
        assert_eq!(CallData::parse("claimRewards"), Ok(CallData::new("claimRewards", vec![])));
        assert_eq!(CallData::parse("claimRewards@"), Ok(CallData::new("claimRewards", vec![vec![]])));
        assert!(matches!(CallData::parse("@64"), Err(Error::InvalidCallData(_))));
        assert!(matches!(CallData::parse(""), Err(Error::InvalidCallData(_))));
        assert!(matches!(
            CallData::parse("f@64@0g"),
            Err(Error::ArgumentDecode { index: 1, cause: mvxabi::Error::Hex(_) }),
        ));
    }

    #[test]
    fn test_decode_arguments() {
        let endpoint = EndpointDefinition::new(
            "swapTokensFixedInput",
            vec![
                ParameterDefinition::parse("token_out", "TokenIdentifier").unwrap(),
                ParameterDefinition::parse("amount_out_min", "BigUint").unwrap(),
            ],
            vec![],
        ).unwrap();

        let call = CallData::parse("swapTokensFixedInput@5745474c442d626434643739@64").unwrap();
        let values = call.decode_arguments(&endpoint).unwrap();
        assert_eq!(values[0].value(), &Value::TokenIdentifier("WEGLD-bd4d79".to_string()));
        assert_eq!(values[1].value(), &Value::UInt(100_u8.into()));

        let other = CallData::parse("otherFunction@64").unwrap();
        assert_eq!(other.decode_arguments(&endpoint), Err(Error::UnknownEndpoint("otherFunction".to_string())));
    }
}
