pub mod config;
pub mod consts;
pub mod error;
pub mod headless;
pub mod io;
pub mod redraw;
pub mod resample;
pub mod scale;
pub mod session;
pub mod source;
pub mod surface;
