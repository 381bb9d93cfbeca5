mod support;
use support::{lambda, nav, p, translator};

use stagefetch::stmt::{BinaryOp, Expr};

#[test]
fn join_keyed_on_neither_side_is_rejected() {
    // `Customer.Where(c => Order.Any(o => o.Note == c.Name))`
    let query = Expr::table("Customer").filter(lambda(
        "c",
        Expr::table("Order").any(lambda(
            "o",
            Expr::eq(p("o").column("Note"), p("c").column("Name")),
        )),
    ));

    let err = translator().translate(&query).unwrap_err();

    assert!(err.is_invalid_join());
    assert_eq!(
        err.to_string(),
        "invalid join: neither side is a primary-key join (Customer(Name) -> Order(Note))"
    );
}

#[test]
fn relation_without_a_join_condition_is_rejected() {
    // `Customer.Where(c => Order.Any(o => o.Note == "x"))`
    let query = Expr::table("Customer").filter(lambda(
        "c",
        Expr::table("Order").any(lambda("o", Expr::eq(p("o").column("Note"), "x"))),
    ));

    let err = translator().translate(&query).unwrap_err();

    assert!(err.is_disconnected_relation());
    assert_eq!(
        err.to_string(),
        "no connection condition found for relation Order"
    );
}

#[test]
fn unknown_query_operator_is_rejected() {
    let query = Expr::call("Queryable", "OrderBy", [Expr::table("Customer")]);

    let err = translator().translate(&query).unwrap_err();
    assert!(err.is_unsupported_expression());
    assert!(err.to_string().contains("OrderBy"));
}

#[test]
fn unsupported_operator_inside_a_predicate_is_rejected() {
    // `Customer.Where(c => (c.Name ?? "x") == "y")`
    let query = Expr::table("Customer").filter(lambda(
        "c",
        Expr::eq(
            Expr::binary_op(p("c").column("Name"), BinaryOp::Coalesce, "x"),
            "y",
        ),
    ));

    assert!(translator()
        .translate(&query)
        .unwrap_err()
        .is_unsupported_expression());
}

#[test]
fn rebinding_a_parameter_in_a_nested_lambda_is_rejected() {
    // `Customer.Where(c => c.Orders.Any(c => c.Note == "x"))`
    let query = Expr::table("Customer").filter(lambda(
        "c",
        p("c")
            .member(nav("Customer", "Orders"))
            .any(lambda("c", Expr::eq(p("c").column("Note"), "x"))),
    ));

    assert!(translator()
        .translate(&query)
        .unwrap_err()
        .is_unsupported_expression());
}

#[test]
fn unbound_parameter_is_unresolved() {
    let query = Expr::table("Customer").filter(lambda("c", Expr::eq(p("d").column("Id"), 1_i64)));

    assert!(translator()
        .translate(&query)
        .unwrap_err()
        .is_unresolved_reference());
}

#[test]
fn unknown_relation_is_reported() {
    let err = translator().translate(&Expr::table("Invoice")).unwrap_err();

    assert!(err.is_unknown_metadata());
    assert_eq!(err.to_string(), "unknown relation `Invoice`");
}

#[test]
fn unknown_column_is_reported() {
    let query = Expr::table("Order").filter(lambda("o", Expr::eq(p("o").column("Discount"), 1_i64)));

    let err = translator().translate(&query).unwrap_err();

    assert!(err.is_unknown_metadata());
    assert_eq!(err.to_string(), "unknown column `Order.Discount`");
}

#[test]
fn custom_conversion_is_rejected() {
    let query = Expr::table("Customer").filter(lambda(
        "c",
        Expr::eq(Expr::convert_with(p("c").column("Id"), "ToWidget"), 1_i64),
    ));

    assert!(translator()
        .translate(&query)
        .unwrap_err()
        .is_unsupported_expression());
}

#[test]
fn failure_leaves_the_translator_usable() {
    let translator = translator();

    let bad = Expr::table("Customer").filter(lambda(
        "c",
        Expr::table("Order").any(lambda("o", Expr::eq(p("o").column("Note"), "x"))),
    ));
    assert!(translator.translate(&bad).is_err());

    assert!(translator.translate(&Expr::table("Customer")).is_ok());
}
