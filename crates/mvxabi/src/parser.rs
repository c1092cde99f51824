use std::collections::HashMap;
use pest::iterators::Pair;
use pest::Parser;
use crate::grammar::{Rule, TypeExpressionGrammar};
use crate::{Error, TypeDescriptor};

/// Source of user-declared struct and enum types referenced by name.
pub trait CustomTypes {
    fn lookup(&self, name: &str) -> Option<Result<TypeDescriptor, Error>>;
}

impl CustomTypes for HashMap<String, TypeDescriptor> {
    fn lookup(&self, name: &str) -> Option<Result<TypeDescriptor, Error>> {
        self.get(name).cloned().map(Ok)
    }
}

/// Parses textual type expressions such as `List<tuple<u8,BigUint>>` into
/// validated descriptors.
#[derive(Clone, Copy, Default)]
pub struct TypeExpressionParser<'r> {
    custom_types: Option<&'r dyn CustomTypes>,
}

impl<'r> TypeExpressionParser<'r> {
    pub fn new() -> Self {
        Self { custom_types: None }
    }

    pub fn with_custom_types(custom_types: &'r dyn CustomTypes) -> Self {
        Self { custom_types: Some(custom_types) }
    }

    pub fn parse(&self, expression: &str) -> Result<TypeDescriptor, Error> {
        let mut pairs = TypeExpressionGrammar::parse(Rule::TypeExpression, expression)
            .map_err(|err| Error::TypeExpression {
                expression: expression.to_string(),
                reason: err.to_string(),
            })?;

        let builder = Builder { custom_types: self.custom_types, expression };
        let pair = pairs.next().ok_or_else(|| builder.invalid("empty expression"))?;
        let ty = builder.accept_type(pair)?;
        ty.validate()?;
        Ok(ty)
    }
}

pub fn parse_type_expression(expression: &str) -> Result<TypeDescriptor, Error> {
    TypeExpressionParser::new().parse(expression)
}

enum Argument {
    Type(TypeDescriptor),
    Size(usize),
}

struct Builder<'a> {
    custom_types: Option<&'a dyn CustomTypes>,
    expression: &'a str,
}

impl Builder<'_> {
    fn invalid(&self, reason: impl ToString) -> Error {
        Error::TypeExpression {
            expression: self.expression.to_string(),
            reason: reason.to_string(),
        }
    }

    fn accept_type(&self, pair: Pair<Rule>) -> Result<TypeDescriptor, Error> {
        let mut inner = pair.into_inner();
        let name = inner.next().ok_or_else(|| self.invalid("missing type name"))?;

        let arguments = match inner.next() {
            None => Vec::new(),
            Some(generics) => generics.into_inner()
                .map(|pair| self.accept_argument(pair))
                .collect::<Result<Vec<_>, Error>>()?,
        };

        self.build(name.as_str(), arguments)
    }

    fn accept_argument(&self, pair: Pair<Rule>) -> Result<Argument, Error> {
        match pair.as_rule() {
            Rule::Type => self.accept_type(pair).map(Argument::Type),
            Rule::Size => pair.as_str().parse::<usize>()
                .map(Argument::Size)
                .map_err(|_| self.invalid(format!("size {} is too large", pair.as_str()))),
            rule => Err(self.invalid(format!("unexpected {:?}", rule))),
        }
    }

    fn build(&self, name: &str, arguments: Vec<Argument>) -> Result<TypeDescriptor, Error> {
        let ty = match name {
            "bool" => self.primitive(name, arguments, TypeDescriptor::Boolean)?,
            "u8" => self.primitive(name, arguments, TypeDescriptor::UnsignedInt(8))?,
            "u16" => self.primitive(name, arguments, TypeDescriptor::UnsignedInt(16))?,
            "u32" | "usize" => self.primitive(name, arguments, TypeDescriptor::UnsignedInt(32))?,
            "u64" => self.primitive(name, arguments, TypeDescriptor::UnsignedInt(64))?,
            "i8" => self.primitive(name, arguments, TypeDescriptor::SignedInt(8))?,
            "i16" => self.primitive(name, arguments, TypeDescriptor::SignedInt(16))?,
            "i32" | "isize" => self.primitive(name, arguments, TypeDescriptor::SignedInt(32))?,
            "i64" => self.primitive(name, arguments, TypeDescriptor::SignedInt(64))?,
            "BigUint" => self.primitive(name, arguments, TypeDescriptor::BigUnsignedInt)?,
            "BigInt" => self.primitive(name, arguments, TypeDescriptor::BigSignedInt)?,
            "Address" => self.primitive(name, arguments, TypeDescriptor::Address)?,
            "bytes" => self.primitive(name, arguments, TypeDescriptor::ByteSequence)?,
            "utf-8 string" | "string" => self.primitive(name, arguments, TypeDescriptor::Utf8String)?,
            "H256" => self.primitive(name, arguments, TypeDescriptor::Hash256)?,
            "TokenIdentifier" => self.primitive(name, arguments, TypeDescriptor::TokenIdentifier)?,
            "CodeMetadata" => self.primitive(name, arguments, TypeDescriptor::CodeMetadata)?,
            "Nothing" => self.primitive(name, arguments, TypeDescriptor::Unit)?,
            "List" => TypeDescriptor::list(self.single(name, arguments)?),
            "Option" => TypeDescriptor::option(self.single(name, arguments)?),
            "tuple" => TypeDescriptor::Tuple(self.many(name, arguments, None)?),
            "FixedArray" => self.fixed_array(arguments)?,
            "MultiArg" | "multi" => TypeDescriptor::MultiValue(self.many(name, arguments, None)?),
            "VarArgs" | "variadic" => TypeDescriptor::variadic(self.single(name, arguments)?),
            "OptionalArg" | "optional" => TypeDescriptor::optional(self.single(name, arguments)?),
            _ => {
                if let Some(size) = numbered(name, "array") {
                    TypeDescriptor::fixed_array(self.single(name, arguments)?, size)
                } else if let Some(size) = numbered(name, "tuple") {
                    TypeDescriptor::Tuple(self.many(name, arguments, Some(size))?)
                } else {
                    self.custom(name, arguments)?
                }
            }
        };
        Ok(ty)
    }

    fn primitive(&self, name: &str, arguments: Vec<Argument>, ty: TypeDescriptor) -> Result<TypeDescriptor, Error> {
        if !arguments.is_empty() {
            return Err(self.invalid(format!("{} takes no type parameters", name)));
        }
        Ok(ty)
    }

    fn single(&self, name: &str, arguments: Vec<Argument>) -> Result<TypeDescriptor, Error> {
        let mut types = self.many(name, arguments, Some(1))?;
        types.pop().ok_or_else(|| self.invalid(format!("{} takes one type parameter", name)))
    }

    fn many(&self, name: &str, arguments: Vec<Argument>, expected: Option<usize>) -> Result<Vec<TypeDescriptor>, Error> {
        match expected {
            Some(expected) if arguments.len() != expected => {
                return Err(self.invalid(format!(
                    "{} takes {} type parameters, got {}",
                    name, expected, arguments.len(),
                )));
            }
            None if arguments.is_empty() => {
                return Err(self.invalid(format!("{} needs at least one type parameter", name)));
            }
            _ => {}
        }

        arguments.into_iter()
            .map(|argument| match argument {
                Argument::Type(ty) => Ok(ty),
                Argument::Size(size) => Err(self.invalid(format!("{} expects a type, got {}", name, size))),
            })
            .collect()
    }

    fn fixed_array(&self, arguments: Vec<Argument>) -> Result<TypeDescriptor, Error> {
        let mut arguments = arguments.into_iter();
        match (arguments.next(), arguments.next(), arguments.next()) {
            (Some(Argument::Size(size)), Some(Argument::Type(element)), None) => {
                Ok(TypeDescriptor::fixed_array(element, size))
            }
            _ => Err(self.invalid("FixedArray takes a size and a type parameter")),
        }
    }

    fn custom(&self, name: &str, arguments: Vec<Argument>) -> Result<TypeDescriptor, Error> {
        let ty = match self.custom_types.and_then(|custom_types| custom_types.lookup(name)) {
            Some(ty) => ty?,
            None => return Err(self.invalid(format!("unknown type {}", name))),
        };
        self.primitive(name, arguments, ty)
    }
}

/// `array32` -> 32, `tuple2` -> 2.
fn numbered(name: &str, prefix: &str) -> Option<usize> {
    let digits = name.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldDefinition, StructType};

    #[test]
    fn test_primitives() {
        assert_eq!(parse_type_expression("u16"), Ok(TypeDescriptor::UnsignedInt(16)));
        assert_eq!(parse_type_expression("usize"), Ok(TypeDescriptor::UnsignedInt(32)));
        assert_eq!(parse_type_expression("isize"), Ok(TypeDescriptor::SignedInt(32)));
        assert_eq!(parse_type_expression("BigUint"), Ok(TypeDescriptor::BigUnsignedInt));
        assert_eq!(parse_type_expression("utf-8 string"), Ok(TypeDescriptor::Utf8String));
        assert_eq!(parse_type_expression("Nothing"), Ok(TypeDescriptor::Unit));
    }

    #[test]
    fn test_generics() {
        assert_eq!(
            parse_type_expression("List<u16>"),
            Ok(TypeDescriptor::list(TypeDescriptor::UnsignedInt(16))),
        );
        assert_eq!(
            parse_type_expression("tuple2<i32, i16>"),
            Ok(TypeDescriptor::Tuple(vec![TypeDescriptor::SignedInt(32), TypeDescriptor::SignedInt(16)])),
        );
        assert_eq!(
            parse_type_expression("array4<u8>"),
            Ok(TypeDescriptor::fixed_array(TypeDescriptor::UnsignedInt(8), 4)),
        );
        assert_eq!(
            parse_type_expression("FixedArray<4, u8>"),
            Ok(TypeDescriptor::fixed_array(TypeDescriptor::UnsignedInt(8), 4)),
        );
        assert_eq!(
            parse_type_expression("VarArgs<MultiArg<TokenIdentifier, BigUint>>"),
            Ok(TypeDescriptor::variadic(TypeDescriptor::MultiValue(vec![
                TypeDescriptor::TokenIdentifier,
                TypeDescriptor::BigUnsignedInt,
            ]))),
        );
        assert_eq!(
            parse_type_expression("Option<List<Address>>"),
            Ok(TypeDescriptor::option(TypeDescriptor::list(TypeDescriptor::Address))),
        );
    }

    #[test]
    fn test_malformed_expressions() {
        for expression in ["MultiArg<u8", "List<>", "<u8>", "", "List<u8>>", "u8 u16"] {
            assert!(
                matches!(parse_type_expression(expression), Err(Error::TypeExpression { .. })),
                "{} should not parse",
                expression,
            );
        }
    }

    #[test]
    fn test_arity_errors() {
        for expression in ["List<u8, u16>", "u8<u16>", "tuple2<u8>", "FixedArray<u8, 4>", "List<4>", "tuple<>"] {
            assert!(
                matches!(parse_type_expression(expression), Err(Error::TypeExpression { .. })),
                "{} should be rejected",
                expression,
            );
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            parse_type_expression("Foo"),
            Err(Error::TypeExpression { expression: "Foo".to_string(), reason: "unknown type Foo".to_string() }),
        );
        assert!(parse_type_expression("u12").is_err());
    }

    #[test]
    fn test_variadic_placement() {
        assert!(parse_type_expression("MultiArg<u8, VarArgs<u8>>").is_ok());
        assert!(matches!(parse_type_expression("MultiArg<VarArgs<u8>, u8>"), Err(Error::InvalidSchema(_))));
        assert!(matches!(parse_type_expression("List<VarArgs<u8>>"), Err(Error::InvalidSchema(_))));
    }

    #[test]
    fn test_custom_types() {
        let point = TypeDescriptor::Struct(StructType::new("Point", vec![
            FieldDefinition::new("x", TypeDescriptor::SignedInt(32)),
            FieldDefinition::new("y", TypeDescriptor::SignedInt(32)),
        ]));
        let mut types = HashMap::new();
        types.insert("Point".to_string(), point.clone());

        let parser = TypeExpressionParser::with_custom_types(&types);
        assert_eq!(parser.parse("List<Point>"), Ok(TypeDescriptor::list(point)));
        assert!(parse_type_expression("List<Point>").is_err());
    }

    #[test]
    fn test_display_reparses() {
        for expression in [
            "List<u16>",
            "tuple<i32,i16>",
            "array4<u8>",
            "Option<utf-8 string>",
            "variadic<multi<TokenIdentifier,BigUint>>",
            "optional<H256>",
        ] {
            let ty = parse_type_expression(expression).unwrap();
            assert_eq!(ty.to_string(), expression);
            assert_eq!(parse_type_expression(&ty.to_string()), Ok(ty));
        }
    }
}
