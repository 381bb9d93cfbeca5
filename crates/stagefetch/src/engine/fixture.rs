use stagefetch_core::{
    schema::{Association, Relation},
    stmt::Expr,
    Schema,
};

pub(crate) fn schema() -> Schema {
    Schema::new([
        Relation::new("Customer")
            .column("Id", "int")
            .column("Name", "nvarchar(100)")
            .column("ReferrerId", "int")
            .primary_key(["Id"])
            .association("Orders", "Id", "Order", "CustomerId")
            .association("Referrer", "ReferrerId", "Customer", "Id"),
        Relation::new("Order")
            .column("Id", "int")
            .column("CustomerId", "int")
            .column("Note", "nvarchar(max)")
            .primary_key(["Id"])
            .association("Customer", "CustomerId", "Customer", "Id")
            .association("Lines", "Id", "OrderLine", "OrderId"),
        Relation::new("OrderLine")
            .column("OrderId", "int")
            .column("LineNo", "int")
            .column("Quantity", "int")
            .primary_key(["OrderId", "LineNo"])
            .association("Order", "OrderId", "Order", "Id"),
    ])
    .unwrap()
}

pub(crate) fn assoc(relation: &str, name: &str) -> Association {
    schema()
        .relation(relation)
        .unwrap()
        .find_association(name)
        .unwrap()
        .clone()
}

/// `p => body`
pub(crate) fn lambda(param: &str, body: Expr) -> Expr {
    Expr::lambda([param], body)
}

pub(crate) fn p(name: &str) -> Expr {
    Expr::param(name)
}
