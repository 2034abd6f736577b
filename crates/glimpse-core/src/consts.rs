/// Directory searched for bundled resources when no roots are configured.
pub const DEFAULT_RESOURCE_ROOT: &str = "resources";

/// Title given to viewer surfaces. Undecorated windows never show it, but
/// task switchers and window managers still do.
pub const DEFAULT_WINDOW_TITLE: &str = "Glimpse";

/// Fill color behind the image (letterbox / pillarbox bars).
pub const DEFAULT_BACKGROUND: [u8; 3] = [0, 0, 0];

/// Number of channels in a decoded source raster (RGBA8).
pub const SOURCE_CHANNELS: usize = 4;
