//! Visual components. Each file co-locates a component's state, event
//! handling, rendering, and tests.

pub mod address_bar;
pub mod companion;
pub mod dns;
pub mod http;
pub mod pipeline;
pub mod rendering;
pub mod server;
pub mod stage_rail;
pub mod tcp;
pub mod title_bar;
pub mod tls;
pub mod url_parser;

pub use address_bar::{AddressBar, AddressEvent};
pub use companion::CompanionGuide;
pub use dns::DnsState;
pub use http::HttpState;
pub use pipeline::PipelineState;
pub use stage_rail::StageRail;
pub use tcp::TcpState;
pub use title_bar::TitleBar;
pub use tls::TlsState;
pub use url_parser::UrlParserState;
