use tokio::sync::oneshot;

use super::data::{FlagOpt, PathOpt, StrOpt, USizeOpt};
use crate::{ArcPath, ArcSlice, ArcStr, log::LogLevel};

/// Messages handled by the configuration actor.
#[derive(Debug)]
pub enum Message {
    /// Loads the configuration from the file
    Load {
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
    /// Saves the current configuration to the file
    Save {
        tx: oneshot::Sender<anyhow::Result<()>>,
    },
    /// Gets a path-valued option
    GetPath {
        opt: PathOpt,
        tx: oneshot::Sender<ArcPath>,
    },
    /// Sets a path-valued option
    SetPath { opt: PathOpt, path: ArcPath },
    /// Gets the log level
    GetLogLevel { tx: oneshot::Sender<LogLevel> },
    /// Sets the log level
    SetLogLevel { level: LogLevel },
    /// Gets a numeric option
    GetUSize {
        opt: USizeOpt,
        tx: oneshot::Sender<usize>,
    },
    /// Sets a numeric option
    SetUSize { opt: USizeOpt, size: usize },
    /// Gets a boolean option
    GetFlag {
        opt: FlagOpt,
        tx: oneshot::Sender<bool>,
    },
    /// Sets a boolean option
    SetFlag { opt: FlagOpt, value: bool },
    /// Gets a string-valued option
    GetStr {
        opt: StrOpt,
        tx: oneshot::Sender<ArcStr>,
    },
    /// Sets a string-valued option
    SetStr { opt: StrOpt, value: ArcStr },
    /// Gets the ordered list of weblog handles
    GetWeblogs {
        tx: oneshot::Sender<ArcSlice<ArcStr>>,
    },
    /// Sets the ordered list of weblog handles
    SetWeblogs { weblogs: ArcSlice<ArcStr> },
}
