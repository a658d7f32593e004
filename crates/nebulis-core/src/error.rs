use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("KDL parse error: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "No site file found. Checked:\n\
        - current directory: site.kdl, site.local.kdl, .site.kdl, .site.local.kdl\n\
        - ./.nebulis/ directory\n\
        - ~/.config/nebulis/site.kdl\n\
        A path can also be given directly via NEBULIS_CONFIG_PATH"
    )]
    SiteFileNotFound,

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, SiteError>;
