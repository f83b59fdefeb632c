//! Core library for managing global message banners
//!
//!     Global message banners are timed, leveled announcement messages shown
//!     platform-wide by a hosted DevOps service. The service keeps them as
//!     plain settings entries; everything interesting about them - the entity
//!     shape, the composite key convention and the message dialects - lives in
//!     this crate.
//!
//!     TLDR for consumers:
//!         - A Banner holds the message in the markdown dialect; the HTML
//!           subset only ever exists on the wire.
//!         - encode/decode are pure and synchronous. Only the StoreClient
//!           suspends, and only it touches the network.
//!         - Decoding a batch never gives up on the whole batch because one
//!           row is broken; bad rows are reported alongside the good ones.
//!
//! Architecture
//!
//!     The file structure:
//!     .
//!     ├── banner.rs       # Banner entity, Priority/Level name tables, key derivation
//!     ├── codec.rs        # Wire shapes and encode/decode between entity and store row
//!     ├── dialects.rs     # Ordered-rule rewriter between markdown and HTML dialects
//!     ├── error.rs
//!     ├── store.rs        # reqwest client for the settings entries endpoint
//!     └── lib.rs
//!
//!     The split keeps the testable core (dialects + codec) free of any I/O:
//!     the store client depends on the codec, never the other way around. The
//!     dialect rewriter is deliberately not a markdown parser - it is a fixed,
//!     order-sensitive list of regex substitutions, because the stored format
//!     was produced by exactly such a list and round-trip fidelity with it
//!     matters more than handling markup the original never emitted.
//!
//! Wire contract
//!
//!     One banner is one settings entry:
//!
//!         GlobalMessageBanners/<p0|p1|p2>-<messageId> ->
//!             { level: "Info"|"Warning"|"Error",
//!               message: "<html subset>",
//!               expirationDate?: "<ISO-8601 instant>" }
//!
//!     Priority and message id are carried by the key alone. An absent
//!     expirationDate means the banner shows indefinitely; the encoder omits
//!     the field rather than writing null.

pub mod banner;
pub mod codec;
pub mod dialects;
pub mod error;
pub mod store;

pub use banner::{Banner, Level, Priority, NAMESPACE};
pub use codec::{decode_all, decode_entry, encode, parse_storage_key, BannerBatch, DecodedBatch, WebBanner};
pub use error::{DecodeError, StoreError};
pub use store::{StoreClient, StoreOptions};
