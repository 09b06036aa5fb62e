//! DOM element ids shared with the host page.
//!
//! The host tags each animated element with `data-overlay="<id>"` and applies
//! the transform the engine writes for that id.

// Gate
pub const QUIZ_CARD: u32 = 1;
pub const QUIZ_ICON: u32 = 2;

// Celebration splash
pub const SPLASH: u32 = 10;
pub const SPLASH_FIRST_LINE: u32 = 11;
pub const SPLASH_SECOND_LINE: u32 = 12;
pub const SPLASH_SUBTITLE: u32 = 13;

// Birthday hero
pub const HERO_TITLE: u32 = 20;
pub const SCROLL_HINT: u32 = 21;
pub const SCROLL_ARROW: u32 = 22;

// Content sections
pub const PHOTOS_HEADER: u32 = 30;
pub const PHOTO_GRID: u32 = 31;
pub const MEMORIES_HEADER: u32 = 40;
pub const CLOSING: u32 = 60;
pub const PHOTO_BASE: u32 = 100;
pub const MEMORY_BASE: u32 = 200;
pub const MEMORY_DOT_BASE: u32 = 250;
pub const DECOR_BASE: u32 = 300;

/// Longest lists the id ranges and the overlay buffer can hold.
pub const MAX_PHOTOS: usize = 24;
pub const MAX_MEMORIES: usize = 24;

/// Overlay transforms written per frame.
pub const MAX_OVERLAYS: usize = 128;

// Birthday page: hint, arrow, two headers, closing, hero title, decor,
// one overlay per photo and two per memory.
const BIRTHDAY_OVERLAYS: usize = 6 + crate::decor::DECOR_COUNT + MAX_PHOTOS + 2 * MAX_MEMORIES;

const _: () = {
    assert!(PHOTO_BASE as usize + MAX_PHOTOS <= MEMORY_BASE as usize);
    assert!(MEMORY_BASE as usize + MAX_MEMORIES <= MEMORY_DOT_BASE as usize);
    assert!(MEMORY_DOT_BASE as usize + MAX_MEMORIES <= DECOR_BASE as usize);
    assert!(BIRTHDAY_OVERLAYS <= MAX_OVERLAYS);
};
