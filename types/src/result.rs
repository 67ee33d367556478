//! Protocol result codes carried by every reply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result code attached to a server reply.
///
/// Codes the client knows by name get their own variant; anything else is
/// preserved verbatim in [`NetResult::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetResult {
    Success,
    InternalError,
    Timeout,
    BadServerData,
    AgeNotFound,
    ConnectFailed,
    Disconnected,
    FileNotFound,
    OldBuildId,
    RemoteShutdown,
    TimeoutOdbc,
    AccountAlreadyExists,
    PlayerAlreadyExists,
    AccountNotFound,
    PlayerNotFound,
    InvalidParameter,
    NameLookupFailed,
    LoggedInElsewhere,
    VaultNodeNotFound,
    MaxPlayersOnAcct,
    AuthenticationFailed,
    StateObjectNotFound,
    LoginDenied,
    CircularReference,
    AccountNotActivated,
    KeyAlreadyUsed,
    KeyNotFound,
    ActivationCodeNotFound,
    PlayerNameInvalid,
    NotSupported,
    ServiceForbidden,
    AuthTokenTooOld,
    TooManyFailedLogins,
    AccountBanned,
    KickedByCcr,
    ServerBusy,
    VaultNodeAccessViolation,
    Pending,
    Other(i32),
}

impl NetResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Numeric wire value.
    pub fn code(&self) -> i32 {
        match self {
            Self::Pending => -1,
            Self::Success => 0,
            Self::InternalError => 1,
            Self::Timeout => 2,
            Self::BadServerData => 3,
            Self::AgeNotFound => 4,
            Self::ConnectFailed => 5,
            Self::Disconnected => 6,
            Self::FileNotFound => 7,
            Self::OldBuildId => 8,
            Self::RemoteShutdown => 9,
            Self::TimeoutOdbc => 10,
            Self::AccountAlreadyExists => 11,
            Self::PlayerAlreadyExists => 12,
            Self::AccountNotFound => 13,
            Self::PlayerNotFound => 14,
            Self::InvalidParameter => 15,
            Self::NameLookupFailed => 16,
            Self::LoggedInElsewhere => 17,
            Self::VaultNodeNotFound => 18,
            Self::MaxPlayersOnAcct => 19,
            Self::AuthenticationFailed => 20,
            Self::StateObjectNotFound => 21,
            Self::LoginDenied => 22,
            Self::CircularReference => 23,
            Self::AccountNotActivated => 24,
            Self::KeyAlreadyUsed => 25,
            Self::KeyNotFound => 26,
            Self::ActivationCodeNotFound => 27,
            Self::PlayerNameInvalid => 28,
            Self::NotSupported => 29,
            Self::ServiceForbidden => 30,
            Self::AuthTokenTooOld => 31,
            Self::TooManyFailedLogins => 33,
            Self::AccountBanned => 38,
            Self::KickedByCcr => 39,
            Self::ServerBusy => 47,
            Self::VaultNodeAccessViolation => 48,
            Self::Other(code) => *code,
        }
    }

    /// Human-readable description used in status messages.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Success => "Success",
            Self::InternalError => "Internal Error",
            Self::Timeout => "No Response From Server",
            Self::BadServerData => "Invalid Server Data",
            Self::AgeNotFound => "Age Not Found",
            Self::ConnectFailed => "Unable To Connect",
            Self::Disconnected => "Disconnected From Server",
            Self::FileNotFound => "File Not Found",
            Self::OldBuildId => "Old Build",
            Self::RemoteShutdown => "Remote Shutdown",
            Self::TimeoutOdbc => "Database Timeout",
            Self::AccountAlreadyExists => "Account Already Exists",
            Self::PlayerAlreadyExists => "Player Already Exists",
            Self::AccountNotFound => "Account Not Found",
            Self::PlayerNotFound => "Player Not Found",
            Self::InvalidParameter => "Invalid Parameter",
            Self::NameLookupFailed => "Name Lookup Failed",
            Self::LoggedInElsewhere => "Logged In Elsewhere",
            Self::VaultNodeNotFound => "Vault Node Not Found",
            Self::MaxPlayersOnAcct => "Max Players On Account",
            Self::AuthenticationFailed => "Authentication Failed",
            Self::StateObjectNotFound => "State Object Not Found",
            Self::LoginDenied => "Login Denied",
            Self::CircularReference => "Circular Reference",
            Self::AccountNotActivated => "Account Not Activated",
            Self::KeyAlreadyUsed => "Key Already Used",
            Self::KeyNotFound => "Key Not Found",
            Self::ActivationCodeNotFound => "Activation Code Not Found",
            Self::PlayerNameInvalid => "Player Name Invalid",
            Self::NotSupported => "Not Supported",
            Self::ServiceForbidden => "Service Forbidden",
            Self::AuthTokenTooOld => "Auth Token Too Old",
            Self::TooManyFailedLogins => "Too Many Failed Logins",
            Self::AccountBanned => "Account Banned",
            Self::KickedByCcr => "Kicked By CCR",
            Self::ServerBusy => "Server Busy",
            Self::VaultNodeAccessViolation => "Vault Node Access Violation",
            Self::Other(_) => "Unknown Error",
        }
    }
}

impl From<i32> for NetResult {
    fn from(code: i32) -> Self {
        match code {
            -1 => Self::Pending,
            0 => Self::Success,
            1 => Self::InternalError,
            2 => Self::Timeout,
            3 => Self::BadServerData,
            4 => Self::AgeNotFound,
            5 => Self::ConnectFailed,
            6 => Self::Disconnected,
            7 => Self::FileNotFound,
            8 => Self::OldBuildId,
            9 => Self::RemoteShutdown,
            10 => Self::TimeoutOdbc,
            11 => Self::AccountAlreadyExists,
            12 => Self::PlayerAlreadyExists,
            13 => Self::AccountNotFound,
            14 => Self::PlayerNotFound,
            15 => Self::InvalidParameter,
            16 => Self::NameLookupFailed,
            17 => Self::LoggedInElsewhere,
            18 => Self::VaultNodeNotFound,
            19 => Self::MaxPlayersOnAcct,
            20 => Self::AuthenticationFailed,
            21 => Self::StateObjectNotFound,
            22 => Self::LoginDenied,
            23 => Self::CircularReference,
            24 => Self::AccountNotActivated,
            25 => Self::KeyAlreadyUsed,
            26 => Self::KeyNotFound,
            27 => Self::ActivationCodeNotFound,
            28 => Self::PlayerNameInvalid,
            29 => Self::NotSupported,
            30 => Self::ServiceForbidden,
            31 => Self::AuthTokenTooOld,
            33 => Self::TooManyFailedLogins,
            38 => Self::AccountBanned,
            39 => Self::KickedByCcr,
            47 => Self::ServerBusy,
            48 => Self::VaultNodeAccessViolation,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for NetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(code) => write!(f, "Unknown Error {code}"),
            known => f.write_str(known.description()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_success_is_success() {
        assert!(NetResult::Success.is_success());
        assert!(!NetResult::AuthenticationFailed.is_success());
        assert!(!NetResult::Other(0x7fff).is_success());
    }

    #[test]
    fn unknown_codes_are_preserved() {
        let r = NetResult::from(1234);
        assert_eq!(r, NetResult::Other(1234));
        assert_eq!(r.code(), 1234);
        assert_eq!(r.to_string(), "Unknown Error 1234");
    }

    #[test]
    fn display_uses_description() {
        assert_eq!(NetResult::AccountNotFound.to_string(), "Account Not Found");
    }
}
