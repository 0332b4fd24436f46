use sqlforge_ir::{SelectQuery, Table};

/// A handful of representative queries, from a bare single-table select up
/// to a joined aggregate with a filter, so the group covers more than one
/// render shape.
pub fn load_test_queries() -> Vec<(&'static str, SelectQuery)> {
    let users = Table::with_columns("users", ["id", "username", "admin"]);
    let tweets = Table::with_columns("tweets", ["id", "user_id", "content"]);

    vec![
        (
            "single_table",
            SelectQuery::new()
                .select([users.col("id"), users.col("username")])
                .from_([users.clone()]),
        ),
        (
            "filtered",
            SelectQuery::new()
                .select([users.col("id")])
                .from_([users.clone()])
                .where_(users.col("admin").eq(true)),
        ),
        (
            "joined_aggregate",
            SelectQuery::new()
                .select([
                    users.col("id"),
                    users.col("username"),
                    sqlforge_functions::fn_::count(tweets.col("id")).alias("ct"),
                ])
                .from_([users.clone()])
                .join_on(tweets.clone(), tweets.col("user_id").eq(users.col("id")))
                .group_by([users.col("id"), users.col("username")]),
        ),
    ]
}
