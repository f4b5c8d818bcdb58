// page behavior for the portfolio site
//
// everything in here is written against small view traits rather than the DOM
// itself, so the webapp crate supplies web-sys implementations and the tests
// supply in-memory ones
pub mod config;
pub mod contact;
pub mod effects;
pub mod event;
pub mod highlight;
pub mod menu;
pub mod scroll;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;
