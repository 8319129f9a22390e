//! Navigation targets and their auth gate.
//!
//! Every route except [`Route::Login`] requires a session; resolving one
//! without a session redirects to the login screen instead of failing.

use crate::session::SessionHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Transactions,
    TransactionAdd,
    Analytics,
    Goals,
    Budgets,
    Settings,
    SettingsCategories,
    Login,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        match trimmed {
            "/" => Some(Self::Dashboard),
            "/transactions" => Some(Self::Transactions),
            "/transactions/add" => Some(Self::TransactionAdd),
            "/analytics" => Some(Self::Analytics),
            "/goals" => Some(Self::Goals),
            "/budgets" => Some(Self::Budgets),
            "/settings" => Some(Self::Settings),
            "/settings/categories" => Some(Self::SettingsCategories),
            "/login" => Some(Self::Login),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Transactions => "/transactions",
            Self::TransactionAdd => "/transactions/add",
            Self::Analytics => "/analytics",
            Self::Goals => "/goals",
            Self::Budgets => "/budgets",
            Self::Settings => "/settings",
            Self::SettingsCategories => "/settings/categories",
            Self::Login => "/login",
        }
    }

    pub fn requires_session(self) -> bool {
        self != Self::Login
    }

    /// The route actually shown for a navigation request.
    pub fn resolve(self, session: &SessionHandle) -> Self {
        if self.requires_session() && !session.is_authenticated() {
            Self::Login
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_parse() {
        assert_eq!(Route::parse("/"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/transactions/add"), Some(Route::TransactionAdd));
        assert_eq!(Route::parse("/settings/categories/"), Some(Route::SettingsCategories));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
    }

    #[test]
    fn unknown_paths_do_not_parse() {
        assert_eq!(Route::parse("/nope"), None);
        assert_eq!(Route::parse("/transactions/edit"), None);
        assert_eq!(Route::parse(""), Some(Route::Dashboard));
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Dashboard,
            Route::Transactions,
            Route::TransactionAdd,
            Route::Analytics,
            Route::Goals,
            Route::Budgets,
            Route::Settings,
            Route::SettingsCategories,
            Route::Login,
        ] {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }

    #[test]
    fn unauthenticated_navigation_redirects_to_login() {
        let session = SessionHandle::default();
        assert_eq!(Route::Dashboard.resolve(&session), Route::Login);
        assert_eq!(Route::Budgets.resolve(&session), Route::Login);
        assert_eq!(Route::Login.resolve(&session), Route::Login);
    }
}
