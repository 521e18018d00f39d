//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use idols_app::{
    auth::{AuthService, Claims, MockAuthService, Role, TokenStore},
    context::AppContext,
    domain::idols::{IdolsService, MockIdolsService, records::IdolRecord},
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USERNAME: &str = "alice";

pub(crate) fn test_claims() -> Claims {
    Claims {
        username: TEST_USERNAME.to_string(),
        role: Role::User,
        issued_at: Timestamp::UNIX_EPOCH,
        expires_at: Timestamp::MAX,
    }
}

pub(crate) fn make_idol(id: i64) -> IdolRecord {
    IdolRecord {
        id,
        name: "Karina".to_string(),
        group: "AESPA".to_string(),
        position: "Leader".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        created_by: "system".to_string(),
        updated_by: "system".to_string(),
        deleted_at: None,
        version: 1,
    }
}

#[salvo::handler]
pub(crate) async fn inject_claims(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_claims(test_claims());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_logout().never();
    auth.expect_authenticate().never();
    auth.expect_usernames().never();

    auth
}

pub(crate) fn strict_idols_mock() -> MockIdolsService {
    let mut idols = MockIdolsService::new();

    idols.expect_list_idols().never();
    idols.expect_get_idol().never();
    idols.expect_create_idol().never();
    idols.expect_update_idol().never();
    idols.expect_delete_idol().never();

    idols
}

pub(crate) fn make_state(
    idols: impl IdolsService + 'static,
    auth: impl AuthService + 'static,
) -> Arc<State> {
    State::from_app_context(AppContext {
        idols: Arc::new(idols),
        auth: Arc::new(auth),
        tokens: Arc::new(TokenStore::new()),
    })
}

pub(crate) fn idols_service(idols: MockIdolsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(idols, strict_auth_mock())))
            .hoop(inject_claims)
            .push(route),
    )
}

pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(strict_idols_mock(), auth)))
            .push(route),
    )
}
