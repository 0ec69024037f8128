//! End-to-end scenarios through the `ConfigCache` façade.

mod caching;
mod capped;
mod concurrency;
mod failures;
mod locks;
mod roles;
