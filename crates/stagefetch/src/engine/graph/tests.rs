use super::{build, Graph, MappedFields};
use crate::engine::{
    fixture::{assoc, lambda, p, schema},
    ir,
};
use stagefetch_core::stmt::Expr;

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn graph_for(expr: &Expr) -> stagefetch_core::Result<Graph> {
    let ir = ir::build(expr)?;
    build(&ir, &schema())
}

#[test]
fn mapped_fields_are_sorted_by_from_field() {
    let mapped = MappedFields::new(&fields(&["b", "a"]), &fields(&["y", "x"]));

    assert_eq!(mapped.pairs().collect::<Vec<_>>(), [("a", "x"), ("b", "y")]);
    assert_eq!(mapped.reversed().pairs().collect::<Vec<_>>(), [("x", "a"), ("y", "b")]);
    assert!(mapped.reversed().is_reverse_of(&mapped));
}

#[test]
fn add_connection_registers_used_fields() {
    let mut graph = Graph::new("Customer");
    let order = graph.add_node("Order");

    assert!(graph.add_connection(graph.root, &fields(&["Id"]), order, &fields(&["CustomerId"])));

    assert!(graph[graph.root].used.contains("Id"));
    assert!(graph[order].used.contains("CustomerId"));
}

#[test]
fn add_connection_is_idempotent_in_either_orientation() {
    let mut graph = Graph::new("Customer");
    let root = graph.root;
    let order = graph.add_node("Order");

    graph.add_connection(root, &fields(&["Id"]), order, &fields(&["CustomerId"]));
    let before = graph.connection_count();

    // Same edge again
    assert!(!graph.add_connection(root, &fields(&["Id"]), order, &fields(&["CustomerId"])));
    // Same edge seen from the other end
    assert!(!graph.add_connection(order, &fields(&["CustomerId"]), root, &fields(&["Id"])));

    assert_eq!(graph.connection_count(), before);
    assert_eq!(graph[root].connections.len(), 1);
    assert!(graph[order].connections.is_empty());
}

#[test]
fn composite_fields_in_any_order_are_the_same_edge() {
    let mut graph = Graph::new("Order");
    let line = graph.add_node("OrderLine");

    graph.add_connection(graph.root, &fields(&["Id", "Rev"]), line, &fields(&["OrderId", "OrderRev"]));
    let added = graph.add_connection(
        graph.root,
        &fields(&["Rev", "Id"]),
        line,
        &fields(&["OrderRev", "OrderId"]),
    );

    assert!(!added);
}

#[test]
fn unreachable_node_fails_validation() {
    let mut graph = Graph::new("Customer");
    graph.add_node("Order");

    let err = graph.validate().unwrap_err();
    assert!(err.is_disconnected_relation());
    assert_eq!(err.to_string(), "no connection condition found for relation Order");
}

#[test]
fn leaf_fields_include_the_primary_key() {
    let mut graph = Graph::new("Customer");
    let root = graph.root;
    graph[root].used.insert("Name".to_string());

    let selected = graph.select_fields(root, &schema()).unwrap();
    assert_eq!(selected, ["Id", "Name"]);
}

#[test]
fn inner_node_fields_are_only_the_used_ones() {
    let mut graph = Graph::new("Order");
    let customer = graph.add_node("Customer");
    graph.add_connection(graph.root, &fields(&["CustomerId"]), customer, &fields(&["Id"]));

    let selected = graph.select_fields(graph.root, &schema()).unwrap();
    assert_eq!(selected, ["CustomerId"]);
}

#[test]
fn root_only_query_has_a_single_node() {
    let graph = graph_for(&Expr::table("Customer")).unwrap();

    assert_eq!(graph.nodes.len(), 1);
    assert!(graph[graph.root].used.is_empty());
}

#[test]
fn constant_comparison_records_the_field_without_a_join() {
    // `Customer.Where(c => c.Name == "123")`
    let graph = graph_for(
        &Expr::table("Customer").filter(lambda("c", Expr::eq(p("c").column("Name"), "123"))),
    )
    .unwrap();

    assert_eq!(graph.nodes.len(), 1);
    assert!(graph[graph.root].used.contains("Name"));
    assert_eq!(graph.connection_count(), 0);
}

#[test]
fn association_navigation_connects_its_key_pair() {
    // `Order.Where(o => o.Customer.Name == "X")`
    let graph = graph_for(&Expr::table("Order").filter(lambda(
        "o",
        Expr::eq(
            p("o").association(&assoc("Order", "Customer")).column("Name"),
            "X",
        ),
    )))
    .unwrap();

    assert_eq!(graph.nodes.len(), 2);

    let [connection] = &graph[graph.root].connections[..] else {
        panic!("expected one connection; graph={graph:#?}");
    };
    assert_eq!(connection.fields.pairs().collect::<Vec<_>>(), [("CustomerId", "Id")]);

    let customer = &graph[connection.to];
    assert_eq!(customer.relation, "Customer");
    assert!(customer.used.contains("Name"));
}

#[test]
fn equality_between_rows_becomes_a_connection() {
    // `Customer.Where(c => Order.Any(o => o.CustomerId == c.Id))`
    let graph = graph_for(&Expr::table("Customer").filter(lambda(
        "c",
        Expr::table("Order").any(lambda(
            "o",
            Expr::eq(p("o").column("CustomerId"), p("c").column("Id")),
        )),
    )))
    .unwrap();

    // Hung off the root even though the order side came first
    let [connection] = &graph[graph.root].connections[..] else {
        panic!("expected one connection; graph={graph:#?}");
    };
    assert_eq!(graph[connection.to].relation, "Order");
    assert_eq!(connection.fields.pairs().collect::<Vec<_>>(), [("Id", "CustomerId")]);
}

#[test]
fn bare_row_stands_for_its_primary_key() {
    // `Customer.Where(c => Order.Any(o => o.Customer == c))`
    let graph = graph_for(&Expr::table("Customer").filter(lambda(
        "c",
        Expr::table("Order").any(lambda(
            "o",
            Expr::eq(p("o").association(&assoc("Order", "Customer")), p("c")),
        )),
    )))
    .unwrap();

    graph.validate().unwrap();

    let root = &graph[graph.root];
    let [connection] = &root.connections[..] else {
        panic!("expected one connection; graph={graph:#?}");
    };
    assert_eq!(connection.fields.pairs().collect::<Vec<_>>(), [("Id", "CustomerId")]);
}

#[test]
fn second_condition_extends_the_existing_connection() {
    // `Customer.Where(c => Order.Any(o => o.CustomerId == c.Id && o.Id == c.ReferrerId))`
    let graph = graph_for(&Expr::table("Customer").filter(lambda(
        "c",
        Expr::table("Order").any(lambda(
            "o",
            Expr::and(
                Expr::eq(p("o").column("CustomerId"), p("c").column("Id")),
                Expr::eq(p("o").column("Id"), p("c").column("ReferrerId")),
            ),
        )),
    )))
    .unwrap();

    let [connection] = &graph[graph.root].connections[..] else {
        panic!("expected one connection; graph={graph:#?}");
    };
    assert_eq!(
        connection.fields.pairs().collect::<Vec<_>>(),
        [("Id", "CustomerId"), ("ReferrerId", "Id")]
    );
}

#[test]
fn comparison_within_one_row_adds_no_connection() {
    // `Customer.Where(c => c.Id == c.ReferrerId)`
    let graph = graph_for(&Expr::table("Customer").filter(lambda(
        "c",
        Expr::eq(p("c").column("Id"), p("c").column("ReferrerId")),
    )))
    .unwrap();

    assert_eq!(graph.connection_count(), 0);
    assert!(graph[graph.root].used.contains("ReferrerId"));
}

#[test]
fn unrelated_relation_is_disconnected() {
    // `Customer.Where(c => Order.Any(o => o.Note == "x"))`
    let err = graph_for(&Expr::table("Customer").filter(lambda(
        "c",
        Expr::table("Order").any(lambda("o", Expr::eq(p("o").column("Note"), "x"))),
    )))
    .unwrap_err();

    assert!(err.is_disconnected_relation());
    assert!(err.to_string().contains("Order"));
}

#[test]
fn composite_key_against_single_field_is_unsupported() {
    // `Order.Where(o => OrderLine.Any(l => l == o.Id))`
    let err = graph_for(&Expr::table("Order").filter(lambda(
        "o",
        Expr::table("OrderLine").any(lambda("l", Expr::eq(p("l"), p("o").column("Id")))),
    )))
    .unwrap_err();

    assert!(err.is_unsupported_expression());
}

#[test]
fn unknown_column_is_reported() {
    let err = graph_for(&Expr::table("Customer").filter(lambda(
        "c",
        Expr::eq(p("c").column("Missing"), "x"),
    )))
    .unwrap_err();

    assert!(err.is_unknown_metadata());
    assert_eq!(err.to_string(), "unknown column `Customer.Missing`");
}

#[test]
fn unknown_relation_is_reported() {
    let err = graph_for(&Expr::table("Nope")).unwrap_err();

    assert!(err.is_unknown_metadata());
}

#[test]
fn projection_member_resolves_to_its_output() {
    // `Order.Select(o => new { Buyer = o.Customer }).Where(x => x.Buyer.Name == "y")`
    let graph = graph_for(
        &Expr::table("Order")
            .select(lambda(
                "o",
                Expr::new_object([(
                    "Buyer",
                    p("o").association(&assoc("Order", "Customer")),
                )]),
            ))
            .filter(lambda(
                "x",
                Expr::eq(p("x").projected("Buyer").column("Name"), "y"),
            )),
    )
    .unwrap();

    assert_eq!(graph.nodes.len(), 2);
    let customer = graph
        .nodes
        .iter()
        .find(|node| node.relation == "Customer")
        .unwrap();
    assert!(customer.used.contains("Name"));
}

#[test]
fn missing_projection_member_is_unresolved() {
    let err = graph_for(
        &Expr::table("Order")
            .select(lambda(
                "o",
                Expr::new_object([("Note", p("o").column("Note"))]),
            ))
            .filter(lambda("x", Expr::eq(p("x").projected("Other"), "y"))),
    )
    .unwrap_err();

    assert!(err.is_unresolved_reference());
}

#[test]
fn built_graph_is_reachable_from_the_root() {
    // `Customer.Where(c => c.Orders.Any(o => o.Lines.Any(l => l.Quantity > 1)))`
    let graph = graph_for(&Expr::table("Customer").filter(lambda(
        "c",
        p("c").association(&assoc("Customer", "Orders")).any(lambda(
            "o",
            p("o")
                .association(&assoc("Order", "Lines"))
                .any(lambda("l", Expr::gt(p("l").column("Quantity"), 1_i64))),
        )),
    )))
    .unwrap();

    let reachable = graph.reachable();
    assert_eq!(reachable.len(), graph.nodes.len());
    assert_eq!(graph.connection_count(), 2);
}

#[test]
fn join_discovered_before_its_link_to_the_root_is_reoriented() {
    // `Customer.Where(c => Order.Any(o => OrderLine.Any(l => l.OrderId == o.Id) && o.CustomerId == c.Id))`
    let graph = graph_for(&Expr::table("Customer").filter(lambda(
        "c",
        Expr::table("Order").any(lambda(
            "o",
            Expr::and(
                Expr::table("OrderLine").any(lambda(
                    "l",
                    Expr::eq(p("l").column("OrderId"), p("o").column("Id")),
                )),
                Expr::eq(p("o").column("CustomerId"), p("c").column("Id")),
            ),
        )),
    )))
    .unwrap();

    let [to_order] = &graph[graph.root].connections[..] else {
        panic!("expected one connection; graph={graph:#?}");
    };
    let order = &graph[to_order.to];
    assert_eq!(order.relation, "Order");

    let [to_line] = &order.connections[..] else {
        panic!("expected one connection; graph={graph:#?}");
    };
    assert_eq!(graph[to_line.to].relation, "OrderLine");
    assert_eq!(to_line.fields.pairs().collect::<Vec<_>>(), [("Id", "OrderId")]);
    assert!(graph[to_line.to].connections.is_empty());
}

#[test]
fn orient_flips_edges_into_the_reachable_part() {
    let mut graph = Graph::new("Customer");
    let root = graph.root;
    let order = graph.add_node("Order");
    let line = graph.add_node("OrderLine");

    graph.add_connection(line, &fields(&["OrderId"]), order, &fields(&["Id"]));
    graph.add_connection(root, &fields(&["Id"]), order, &fields(&["CustomerId"]));
    assert!(graph.validate().is_err());

    graph.orient();
    graph.validate().unwrap();

    assert_eq!(graph[order].connections.len(), 1);
    assert_eq!(graph[order].connections[0].to, line);
    assert_eq!(graph[root].connections[0].to, order);
    assert!(graph[line].connections.is_empty());
}
