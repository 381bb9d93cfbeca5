/// Reference to a relation by name. A chain that starts here reads the
/// relation's rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprTable {
    pub relation: String,
}

/// A lambda parameter, resolved lexically against the enclosing lambdas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprParam {
    pub name: String,
}

/// A variable the query closes over. Its value is supplied at execution time
/// and never contributes to the join graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprCaptured {
    pub name: String,
}
