//! # Server Processing Stage
//!
//! What happens on the far side once the request lands: a four-step
//! pipeline from the load balancer down to the response leaving the
//! origin. Content only — the walking/rendering engine is
//! [`PipelineState`](super::pipeline::PipelineState).

use super::pipeline::{PipelineState, PipelineStep};

const STEPS: [PipelineStep; 4] = [
    PipelineStep {
        name: "Load Balancer",
        detail: "The request first hits a load balancer or CDN edge node, \
                 often terminating TLS right there. It picks a healthy \
                 backend by geography and load, so two requests from the \
                 same page may be served by machines on different continents.",
        metric: Some("~1ms"),
        snippet: Some(
            "```nginx\nupstream app {\n    least_conn;\n    server 10.0.1.11:8080;\n    server 10.0.1.12:8080;\n}\n```",
        ),
    },
    PipelineStep {
        name: "Application Logic",
        detail: "The web framework routes the path to a handler: \
                 authentication, validation, business rules. This is the \
                 code the site's own developers wrote, sandwiched between \
                 layers of infrastructure they mostly didn't.",
        metric: Some("~5ms"),
        snippet: Some(
            "```rust\nasync fn search(Query(params): Query<SearchParams>) -> Json<Results> {\n    Json(index.lookup(&params.q).await)\n}\n```",
        ),
    },
    PipelineStep {
        name: "Database Query",
        detail: "Handlers rarely answer from memory. A query goes to a \
                 database, usually through a connection pool, and often \
                 behind a Redis or Memcached cache that absorbs the \
                 repeat traffic.",
        metric: Some("~10ms · p99 80ms"),
        snippet: Some(
            "```sql\nSELECT title, url FROM pages\nWHERE ts_vector @@ plainto_tsquery($1)\nLIMIT 10;\n```",
        ),
    },
    PipelineStep {
        name: "Response Assembly",
        detail: "Results are serialized (JSON or HTML), compressed per the \
                 Accept-Encoding header, stamped with caching headers, and \
                 handed back up the same chain the request came down.",
        metric: Some("~2ms"),
        snippet: None,
    },
];

pub fn server_pipeline() -> PipelineState {
    PipelineState::new("Inside the Server", "Response ready", &STEPS)
}
