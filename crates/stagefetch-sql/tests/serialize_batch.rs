use pretty_assertions::assert_eq;
use stagefetch_sql::{
    stmt::{
        ColumnDef, DeclareTable, InsertSelect, JoinSource, KeyFilter, Previous, Source, TableVar,
    },
    Batch, Serializer, Statement,
};

fn var(name: &str) -> TableVar {
    TableVar(name.to_string())
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn declare(name: &str, cols: &[(&str, &str)]) -> DeclareTable {
    DeclareTable {
        var: var(name),
        columns: cols
            .iter()
            .map(|(name, ty)| ColumnDef {
                name: name.to_string(),
                ty: ty.to_string(),
            })
            .collect(),
    }
}

#[test]
fn declare_table() {
    let stmt = Statement::from(declare(
        "@tableCustomer",
        &[("Id", "int"), ("Name", "nvarchar(100)")],
    ));

    assert_eq!(
        Serializer::new().serialize(&stmt),
        "DECLARE @tableCustomer TABLE(Id int, Name nvarchar(100));"
    );
}

#[test]
fn declare_table_writes_types_verbatim() {
    let stmt = Statement::from(declare(
        "@tablesales_Order",
        &[("Total", "decimal(18,2)"), ("Note", "nvarchar(max)")],
    ));

    assert_eq!(
        Serializer::new().serialize(&stmt),
        "DECLARE @tablesales_Order TABLE(Total decimal(18,2), Note nvarchar(max));"
    );
}

#[test]
fn select_all() {
    let stmt = Statement::select_all(var("@tableOrder"));
    assert_eq!(
        Serializer::new().serialize(&stmt),
        "SELECT * FROM @tableOrder;"
    );
}

#[test]
fn insert_select_by_composite_key() {
    let stmt = Statement::insert_select(
        var("@tableOrderLine"),
        columns(&["LineNo", "OrderId"]),
        "OrderLine",
        Source::Key(vec![
            KeyFilter {
                column: "OrderId".to_string(),
                param: "@p0".to_string(),
            },
            KeyFilter {
                column: "LineNo".to_string(),
                param: "@p1".to_string(),
            },
        ]),
    );

    assert_eq!(
        Serializer::new().serialize(&stmt),
        "INSERT INTO @tableOrderLine SELECT current.LineNo, current.OrderId FROM OrderLine AS current \
         WHERE current.OrderId = @p0 AND current.LineNo = @p1;"
    );
}

#[test]
fn insert_select_join_distinct_previous() {
    let stmt = Statement::insert_select(
        var("@tableOrder"),
        columns(&["CustomerId", "Id"]),
        "Order",
        Source::Join(JoinSource {
            previous: Previous::Distinct {
                var: var("@tableCustomer"),
                columns: columns(&["Id"]),
            },
            on: vec![("CustomerId".to_string(), "Id".to_string())],
        }),
    );

    assert_eq!(
        Serializer::new().serialize(&stmt),
        "INSERT INTO @tableOrder SELECT current.CustomerId, current.Id FROM Order AS current \
         INNER JOIN (SELECT DISTINCT Id FROM @tableCustomer) AS previous ON current.CustomerId = previous.Id;"
    );
}

#[test]
fn insert_select_join_previous_var() {
    let stmt = Statement::insert_select(
        var("@tableProduct"),
        columns(&["Id", "Name"]),
        "dbo.Product",
        Source::Join(JoinSource {
            previous: Previous::Var(var("@tableOrder")),
            on: vec![("Id".to_string(), "ProductId".to_string())],
        }),
    );

    assert_eq!(
        Serializer::new().serialize(&stmt),
        "INSERT INTO @tableProduct SELECT current.Id, current.Name FROM dbo.Product AS current \
         INNER JOIN @tableOrder AS previous ON current.Id = previous.ProductId;"
    );
}

#[test]
fn batch_layout() {
    let batch = Batch {
        declarations: vec![
            declare("@tableCustomer", &[("Id", "int")]),
            declare("@tableOrder", &[("CustomerId", "int"), ("Id", "int")]),
        ],
        fetches: vec![
            InsertSelect {
                target: var("@tableCustomer"),
                columns: columns(&["Id"]),
                relation: "Customer".to_string(),
                source: Source::Key(vec![KeyFilter {
                    column: "Id".to_string(),
                    param: "@p0".to_string(),
                }]),
            },
            InsertSelect {
                target: var("@tableOrder"),
                columns: columns(&["CustomerId", "Id"]),
                relation: "Order".to_string(),
                source: Source::Join(JoinSource {
                    previous: Previous::Var(var("@tableCustomer")),
                    on: vec![("CustomerId".to_string(), "Id".to_string())],
                }),
            },
        ],
    };

    let expected = "\
DECLARE @tableCustomer TABLE(Id int);
DECLARE @tableOrder TABLE(CustomerId int, Id int);

INSERT INTO @tableCustomer SELECT current.Id FROM Customer AS current WHERE current.Id = @p0;
SELECT * FROM @tableCustomer;

INSERT INTO @tableOrder SELECT current.CustomerId, current.Id FROM Order AS current INNER JOIN @tableCustomer AS previous ON current.CustomerId = previous.Id;
SELECT * FROM @tableOrder;";

    assert_eq!(Serializer::new().serialize_batch(&batch), expected);
}

#[test]
fn batch_statements_pair_each_fetch_with_select_all() {
    let batch = Batch {
        declarations: vec![declare("@tableCustomer", &[("Id", "int")])],
        fetches: vec![InsertSelect {
            target: var("@tableCustomer"),
            columns: columns(&["Id"]),
            relation: "Customer".to_string(),
            source: Source::Key(vec![KeyFilter {
                column: "Id".to_string(),
                param: "@p0".to_string(),
            }]),
        }],
    };

    let stmts: Vec<_> = batch.statements().collect();

    assert_eq!(stmts.len(), 3);
    assert!(matches!(stmts[0], Statement::DeclareTable(_)));
    assert!(matches!(stmts[1], Statement::InsertSelect(_)));
    assert_eq!(stmts[2], Statement::select_all(var("@tableCustomer")));
}
