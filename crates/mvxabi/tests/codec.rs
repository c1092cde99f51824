use mvxabi::types::validate_sequence;
use mvxabi::{
    parse_type_expression,
    Address,
    BinaryCodec,
    EncodingMode,
    EnumType,
    EnumValue,
    EnumVariant,
    Error,
    Field,
    FieldDefinition,
    StructType,
    TypeDescriptor,
    TypedValue,
    Value,
};

fn round_trip(value: &TypedValue) {
    let codec = BinaryCodec::new();

    let top = codec.encode_top_level(value).unwrap();
    assert_eq!(codec.decode_top_level(&top, value.ty()).as_ref(), Ok(value), "top-level {}", value.ty());

    let nested = codec.encode_nested(value).unwrap();
    assert_eq!(codec.decode_nested(&nested, value.ty()), Ok((value.clone(), nested.len())), "nested {}", value.ty());
}

fn payment_type() -> StructType {
    StructType::new("EsdtTokenPayment", vec![
        FieldDefinition::new("token_identifier", TypeDescriptor::TokenIdentifier),
        FieldDefinition::new("token_nonce", TypeDescriptor::UnsignedInt(64)),
        FieldDefinition::new("amount", TypeDescriptor::BigUnsignedInt),
    ])
}

#[test]
fn primitives_round_trip() {
    let values = vec![
        TypedValue::boolean(true),
        TypedValue::boolean(false),
        TypedValue::u8(0),
        TypedValue::u16(0xABBA),
        TypedValue::u32(100),
        TypedValue::u64(u64::MAX),
        TypedValue::i8(-128),
        TypedValue::i16(-1),
        TypedValue::i32(127),
        TypedValue::i64(i64::MIN),
        TypedValue::big_uint(0_u32),
        TypedValue::big_uint(u128::MAX),
        TypedValue::big_int(-256),
        TypedValue::big_int(255),
        TypedValue::address(Address::new([7; 32])),
        TypedValue::bytes(vec![0xAB, 0xBA]),
        TypedValue::string("hello"),
        TypedValue::h256([0xEE; 32]),
        TypedValue::token_identifier("WEGLD-bd4d79"),
        TypedValue::unit(),
    ];

    for value in values.iter() {
        round_trip(value);
    }
}

#[test]
fn composites_round_trip() {
    let payment = TypedValue::structure(payment_type(), vec![
        Field::new("token_identifier", Value::TokenIdentifier("MEX-455c57".to_string())),
        Field::new("token_nonce", Value::UInt(3_u8.into())),
        Field::new("amount", Value::UInt(10_u8.pow(2).into())),
    ]).unwrap();

    let status = EnumType::new("Status", vec![
        EnumVariant::new("Inactive", 0, vec![]),
        EnumVariant::new("Paying", 1, vec![FieldDefinition::new("payment", TypeDescriptor::Struct(payment_type()))]),
    ]);
    let paying = TypedValue::enumeration(status.clone(), "Paying", vec![
        Field::new("payment", payment.value().clone()),
    ]).unwrap();

    let values = vec![
        payment.clone(),
        paying,
        TypedValue::enumeration(status, "Inactive", vec![]).unwrap(),
        TypedValue::list(TypeDescriptor::Struct(payment_type()), vec![payment.clone(), payment]).unwrap(),
        TypedValue::array(TypeDescriptor::UnsignedInt(8), vec![TypedValue::u8(1), TypedValue::u8(2)]).unwrap(),
        TypedValue::tuple(vec![TypedValue::i32(100), TypedValue::i16(10)]),
        TypedValue::tuple(vec![TypedValue::bytes(vec![1]), TypedValue::bytes(vec![])]),
        TypedValue::some(TypedValue::u8(7)),
        TypedValue::none(TypeDescriptor::UnsignedInt(8)),
        TypedValue::some(TypedValue::list(TypeDescriptor::Utf8String, vec![TypedValue::string("a")]).unwrap()),
    ];

    for value in values.iter() {
        round_trip(value);
    }
}

#[test]
fn zero_and_false_are_empty_at_top_level() {
    let codec = BinaryCodec::new();

    assert_eq!(codec.encode_top_level(&TypedValue::u32(0)), Ok(vec![]));
    assert_eq!(codec.encode_top_level(&TypedValue::i64(0)), Ok(vec![]));
    assert_eq!(codec.encode_top_level(&TypedValue::big_uint(0_u8)), Ok(vec![]));
    assert_eq!(codec.encode_top_level(&TypedValue::boolean(false)), Ok(vec![]));

    assert_eq!(codec.decode_top_level(&[], &TypeDescriptor::UnsignedInt(32)), Ok(TypedValue::u32(0)));
    assert_eq!(codec.decode_top_level(&[], &TypeDescriptor::Boolean), Ok(TypedValue::boolean(false)));
}

#[test]
fn top_level_signed_integers_are_minimal() {
    let codec = BinaryCodec::new();

    assert_eq!(codec.encode_top_level(&TypedValue::i64(-1)), Ok(vec![0xFF]));
    assert_eq!(codec.encode_top_level(&TypedValue::i16(127)), Ok(vec![0x7F]));
    assert_eq!(codec.encode_top_level(&TypedValue::i16(128)), Ok(vec![0x00, 0x80]));
    assert_eq!(codec.encode_top_level(&TypedValue::i16(-129)), Ok(vec![0xFF, 0x7F]));
    assert_eq!(codec.encode_nested(&TypedValue::i16(-1)), Ok(vec![0xFF, 0xFF]));
}

#[test]
fn option_asymmetry() {
    let codec = BinaryCodec::new();
    let some = TypedValue::some(TypedValue::u8(7));

    assert_eq!(codec.encode_top_level(&some), codec.encode_top_level(&TypedValue::u8(7)));
    assert_eq!(codec.encode_nested(&some), Ok(vec![0x01, 0x07]));
    assert_eq!(codec.encode_top_level(&TypedValue::none(TypeDescriptor::UnsignedInt(8))), Ok(vec![]));
}

#[test]
fn tuple_has_fixed_arity() {
    let codec = BinaryCodec::new();
    let tuple = TypedValue::tuple(vec![TypedValue::i32(100), TypedValue::i16(10)]);

    let bytes = codec.encode_top_level(&tuple).unwrap();
    assert_eq!(bytes.len(), 6);

    for length in 0..bytes.len() {
        assert!(matches!(
            codec.decode_top_level(&bytes[..length], tuple.ty()),
            Err(Error::BufferUnderrun { .. }),
        ));
    }
}

#[test]
fn malformed_inputs() {
    let codec = BinaryCodec::new();

    assert_eq!(
        codec.decode_top_level(&[0; 31], &TypeDescriptor::Address),
        Err(Error::BufferUnderrun { expected: 32, available: 31 }),
    );
    assert_eq!(
        codec.decode_top_level(&[0; 3], &TypeDescriptor::UnsignedInt(16)),
        Err(Error::InvalidLength { expected: 2, actual: 3 }),
    );
    assert!(matches!(parse_type_expression("MultiArg<u8"), Err(Error::TypeExpression { .. })));
    assert!(matches!(
        codec.decode_top_level(&[0xFF, 0xFE], &TypeDescriptor::Utf8String),
        Err(Error::Utf8(_)),
    ));
}

#[test]
fn fixed_array_short_buffer_is_arity_error() {
    let codec = BinaryCodec::new();
    let ty = parse_type_expression("array3<u16>").unwrap();

    assert_eq!(
        codec.decode_top_level(&[0, 1, 0, 2, 0], &ty),
        Err(Error::Arity { expected: 3, actual: 2 }),
    );
}

#[test]
fn nested_struct_decoding_is_atomic() {
    let codec = BinaryCodec::new();
    let ty = TypeDescriptor::Struct(payment_type());
    let bytes = hex::decode("0000000a4d45582d3435356335370000000000000005000000030f42").unwrap();

    assert!(matches!(codec.decode_nested(&bytes, &ty), Err(Error::BufferUnderrun { .. })));
}

#[test]
fn assignability() {
    let big = TypeDescriptor::BigUnsignedInt;

    assert!(big.is_assignable_from(&TypeDescriptor::UnsignedInt(8)));
    assert!(!TypeDescriptor::UnsignedInt(32).is_assignable_from(&TypeDescriptor::UnsignedInt(8)));
    assert!(!TypeDescriptor::UnsignedInt(8).is_assignable_from(&big));
    assert!(mvxabi::is_assignable_from(
        &TypeDescriptor::list(TypeDescriptor::BigSignedInt),
        &TypeDescriptor::list(TypeDescriptor::SignedInt(64)),
    ));
}

#[test]
fn variadic_must_be_last() {
    let variadic = TypeDescriptor::variadic(TypeDescriptor::ByteSequence);
    let number = TypeDescriptor::UnsignedInt(32);

    assert!(validate_sequence(&[number.clone(), variadic.clone()]).is_ok());
    assert!(matches!(validate_sequence(&[variadic.clone(), number]), Err(Error::InvalidSchema(_))));
    assert!(matches!(validate_sequence(&[variadic.clone(), variadic]), Err(Error::InvalidSchema(_))));
}

#[test]
fn enum_values_carry_their_variant() {
    let codec = BinaryCodec::new();
    let ty = TypeDescriptor::Enum(EnumType::new("Direction", vec![
        EnumVariant::new("Up", 0, vec![]),
        EnumVariant::new("Down", 1, vec![]),
    ]));

    let decoded = codec.decode_nested(&[0x01], &ty).unwrap().0;
    assert_eq!(decoded.value(), &Value::Enum(EnumValue::new("Down", 1, vec![])));
}

#[test]
fn declared_sizes_are_bounded_by_the_buffer() {
    let codec = BinaryCodec::new();

    let bytes = parse_type_expression("array18446744073709551615<u8>").unwrap();
    assert_eq!(
        codec.decode(&[0x01], &bytes, EncodingMode::Nested),
        Err(Error::Arity { expected: usize::MAX, actual: 1 }),
    );

    let words = parse_type_expression("array18446744073709551615<u64>").unwrap();
    assert!(words.is_open_ended());
    assert!(codec.decode(&[0x01], &words, EncodingMode::TopLevel).is_err());

    let units = parse_type_expression("List<Nothing>").unwrap();
    assert!(matches!(
        codec.decode(&[0x00, 0x40, 0x00, 0x00], &units, EncodingMode::Nested),
        Err(Error::InvalidData(_)),
    ));
}
