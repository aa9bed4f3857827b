//! Access guard for owner-only views.
//!
//! The guard is a synchronous check over the session flag, executed before a
//! protected view renders. Denial yields a redirect target and the protected
//! closure is never invoked, so privileged content cannot flash for
//! unauthenticated visitors. This is advisory UI routing, not an
//! authorization boundary; the remote service keeps its own checks.

use tracing::debug;

use crate::session::SessionStore;

/// Navigation targets of the app shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    RoleSelect,
    Menu,
    Cart,
    Checkout,
    OwnerLogin,
    AdminMenu,
    AdminOffers,
    AdminOrders,
    AdminSettings,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::RoleSelect => "/",
            Route::Menu => "/menu",
            Route::Cart => "/cart",
            Route::Checkout => "/checkout",
            Route::OwnerLogin => "/owner/login",
            Route::AdminMenu => "/owner/admin/menu",
            Route::AdminOffers => "/owner/admin/offers",
            Route::AdminOrders => "/owner/admin/orders",
            Route::AdminSettings => "/owner/admin/settings",
        }
    }
}

/// Outcome of the synchronous access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied { redirect: Route },
}

/// What a guarded view produced: the rendered value, or the route the
/// caller must navigate to instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    Rendered(T),
    Redirected(Route),
}

/// Gate in front of the owner-only views.
#[derive(Clone)]
pub struct OwnerGuard {
    session: SessionStore,
}

impl OwnerGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Reads the session flag; unauthenticated callers are pointed at the
    /// owner login route.
    pub fn check(&self) -> Access {
        if self.session.is_authenticated() {
            Access::Granted
        } else {
            debug!("Owner view denied, redirecting to login");
            Access::Denied {
                redirect: Route::OwnerLogin,
            }
        }
    }

    /// Runs `render` only when access is granted. On denial the closure is
    /// never invoked, so no privileged value ever exists.
    pub fn protect<T>(&self, render: impl FnOnce() -> T) -> Guarded<T> {
        match self.check() {
            Access::Granted => Guarded::Rendered(render()),
            Access::Denied { redirect } => Guarded::Redirected(redirect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn session() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn unauthenticated_never_invokes_the_protected_view() {
        let guard = OwnerGuard::new(session());
        let mut rendered = false;

        let outcome = guard.protect(|| {
            rendered = true;
            "admin dashboard"
        });

        assert_eq!(outcome, Guarded::Redirected(Route::OwnerLogin));
        assert!(!rendered);
    }

    #[test]
    fn authenticated_renders_unconditionally() {
        let session = session();
        session.set_authenticated();
        let guard = OwnerGuard::new(session);

        let outcome = guard.protect(|| "admin dashboard");
        assert_eq!(outcome, Guarded::Rendered("admin dashboard"));
    }

    #[test]
    fn check_follows_the_session_flag() {
        let session = session();
        let guard = OwnerGuard::new(session.clone());

        assert_eq!(
            guard.check(),
            Access::Denied {
                redirect: Route::OwnerLogin
            }
        );

        session.set_authenticated();
        assert_eq!(guard.check(), Access::Granted);

        session.clear();
        assert_eq!(
            guard.check(),
            Access::Denied {
                redirect: Route::OwnerLogin
            }
        );
    }

    #[test]
    fn routes_map_to_stable_paths() {
        assert_eq!(Route::OwnerLogin.path(), "/owner/login");
        assert_eq!(Route::AdminOrders.path(), "/owner/admin/orders");
        assert_eq!(Route::Menu.path(), "/menu");
    }
}
