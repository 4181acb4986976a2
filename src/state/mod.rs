//! State module for tracking scrape progress
//!
//! Both structures live for a single run and are owned by the component that
//! mutates them: the page cache by the content renderer, the visited set by
//! the document assembler.
//!
//! # Components
//!
//! - `PageCache`: rendered page text by normalized URL, first rendering wins
//! - `VisitedSet`: URLs whose content has already been inlined

mod page_cache;
mod visited;

// Re-export main types
pub use page_cache::PageCache;
pub use visited::VisitedSet;
