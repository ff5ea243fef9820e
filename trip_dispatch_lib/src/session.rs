use crate::status::{Role, Status};

pub const USER_SID_COOKIE: &str = "userSID";
pub const ROLE_COOKIE: &str = "role";
pub const STATUS_COOKIE: &str = "status";

/// The logged-in identity, parsed from cookies once at startup and passed
/// explicitly into the pages that need it.
///
/// The cookies are written client-side at login with no server-issued token,
/// so nothing here is trustworthy for real authorization. The backend treats
/// the SID as a display/filter value only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_sid: String,
    pub role: Role,
    pub status: Status,
}

impl Session {
    /// Parses a `document.cookie` style string. All three session cookies
    /// must be present and well formed, otherwise there is no session.
    pub fn from_cookies(cookies: &str) -> Option<Session> {
        let mut user_sid = None;
        let mut role = None;
        let mut status = None;

        for pair in cookies.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim();

            match name.trim() {
                USER_SID_COOKIE => user_sid = Some(value.to_string()),
                ROLE_COOKIE => {
                    role = value.parse::<u8>().ok().and_then(|v| Role::try_from(v).ok());
                }
                STATUS_COOKIE => {
                    status = value.parse::<u8>().ok().and_then(|v| Status::try_from(v).ok());
                }
                _ => {}
            }
        }

        Some(Session {
            user_sid: user_sid.filter(|sid| !sid.is_empty())?,
            role: role?,
            status: status?,
        })
    }

    /// Anything but an Active account is treated as logged out.
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Cookie pairs to persist at login.
    pub fn to_cookies(&self) -> [(&'static str, String); 3] {
        [
            (USER_SID_COOKIE, self.user_sid.clone()),
            (ROLE_COOKIE, u8::from(self.role).to_string()),
            (STATUS_COOKIE, u8::from(self.status).to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cookie_string() {
        let session = Session::from_cookies("userSID=u-123; role=5; status=1").unwrap();
        assert_eq!(session.user_sid, "u-123");
        assert_eq!(session.role, Role::Driver);
        assert_eq!(session.status, Status::Active);
        assert!(session.is_active());
    }

    #[test]
    fn ignores_foreign_cookies() {
        let session =
            Session::from_cookies("theme=dark; userSID=u-1; role=4; status=1; _ga=GA1.2").unwrap();
        assert_eq!(session.role, Role::Admin);
    }

    #[test]
    fn round_trips_through_cookie_pairs() {
        let session = Session {
            user_sid: "u-9".to_string(),
            role: Role::Admin,
            status: Status::Active,
        };

        let rendered = session
            .to_cookies()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");

        assert_eq!(Session::from_cookies(&rendered).unwrap(), session);
    }

    #[test]
    fn missing_or_malformed_cookies_mean_no_session() {
        assert!(Session::from_cookies("").is_none());
        assert!(Session::from_cookies("userSID=u-1; role=5").is_none());
        assert!(Session::from_cookies("userSID=u-1; role=nope; status=1").is_none());
        // role=2 is a valid Status but not a valid Role
        assert!(Session::from_cookies("userSID=u-1; role=2; status=1").is_none());
        assert!(Session::from_cookies("userSID=; role=5; status=1").is_none());
    }

    #[test]
    fn inactive_session_is_not_active() {
        let session = Session::from_cookies("userSID=u-1; role=5; status=2").unwrap();
        assert!(!session.is_active());
    }
}
