#[derive(Parser)]
#[grammar = "grammar/type_expression.pest"]
pub struct TypeExpressionGrammar;
