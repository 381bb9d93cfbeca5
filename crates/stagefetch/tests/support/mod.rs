#![allow(dead_code)]

use stagefetch::{
    schema::Relation,
    stmt::{Expr, Member},
    Schema, Translator,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn schema() -> Schema {
    Schema::new([
        Relation::new("Customer")
            .column("Id", "int")
            .column("Name", "nvarchar(100)")
            .column("ReferrerId", "int")
            .column("AddressId", "int")
            .primary_key(["Id"])
            .association("Orders", "Id", "Order", "CustomerId")
            .association("Referrer", "ReferrerId", "Customer", "Id")
            .association("Address", "AddressId", "Address", "Id"),
        Relation::new("Order")
            .column("Id", "int")
            .column("CustomerId", "int")
            .column("Note", "nvarchar(max)")
            .column("Total", "decimal(18,2)")
            .primary_key(["Id"])
            .association("Customer", "CustomerId", "Customer", "Id")
            .association("Lines", "Id", "OrderLine", "OrderId"),
        Relation::new("OrderLine")
            .column("OrderId", "int")
            .column("LineNo", "int")
            .column("ProductId", "int")
            .column("Quantity", "int")
            .primary_key(["OrderId", "LineNo"])
            .association("Order", "OrderId", "Order", "Id")
            .association("Product", "ProductId", "sales.Product", "Id"),
        Relation::new("sales.Product")
            .column("Id", "int")
            .column("Name", "nvarchar(100)")
            .primary_key(["Id"]),
        Relation::new("Address")
            .column("Id", "int")
            .column("City", "nvarchar(100)")
            .primary_key(["Id"]),
    ])
    .unwrap()
}

pub fn translator() -> Translator {
    init_logging();
    Translator::new(schema())
}

/// Association member `relation.name`, resolved through the schema.
pub fn nav(relation: &str, name: &str) -> Member {
    schema().association(relation, name).unwrap()
}

/// `param => body`
pub fn lambda(param: &str, body: Expr) -> Expr {
    Expr::lambda([param], body)
}

pub fn p(name: &str) -> Expr {
    Expr::param(name)
}
