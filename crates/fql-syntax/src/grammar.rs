use pest_derive::Parser;

/// Pest-generated recogniser for the token shapes of the filter language.
#[derive(Parser)]
#[grammar = "grammar/fql.pest"]
pub struct FqlGrammar;
