use sqlforge_ir::SelectQuery;
use sqlforge_render::{render_to_sql, ContextOptions};

pub struct RenderResult {
    pub duration_ns: u128,
    pub sql_len: usize,
}

/// Render a single query and report how long it took and how large the
/// resulting SQL text came out.
pub fn run_render_scenario(query: &SelectQuery) -> RenderResult {
    let start = std::time::Instant::now();

    let (sql, _params) =
        render_to_sql(query, ContextOptions::default()).expect("fixture query must render");

    let duration = start.elapsed().as_nanos();

    RenderResult {
        duration_ns: duration,
        sql_len: sql.len(),
    }
}

/// Render the same query `n` times in a row, simulating a hot query being
/// re-rendered per request rather than cached.
pub fn run_repeated_render(query: &SelectQuery, n: usize) -> RenderResult {
    let start = std::time::Instant::now();

    let mut sql_len = 0;
    for _ in 0..n {
        let (sql, _params) =
            render_to_sql(query, ContextOptions::default()).expect("fixture query must render");
        sql_len = sql.len();
    }

    RenderResult {
        duration_ns: start.elapsed().as_nanos(),
        sql_len,
    }
}
