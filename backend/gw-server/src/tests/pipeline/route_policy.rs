use crate::api::policies;
use crate::{RoutePolicy, Stage};

#[test]
fn given_identity_route_when_listing_stages_then_no_tenant_stage() {
    assert_eq!(
        policies::USERS_ME.stages(),
        vec![Stage::Authenticate, Stage::RateLimit]
    );
    assert_eq!(
        policies::SHOPS_READ.stages(),
        vec![Stage::Authenticate, Stage::RateLimit, Stage::RequirePermissions]
    );
}

#[test]
fn given_tenant_route_when_listing_stages_then_tenant_precedes_permissions() {
    assert_eq!(
        policies::PRODUCTS_LIST.stages(),
        vec![
            Stage::Authenticate,
            Stage::RateLimit,
            Stage::ResolveTenant,
            Stage::RequirePermissions,
        ]
    );
}

#[test]
fn given_every_combination_when_listing_stages_then_order_is_ascending() {
    let policy = RoutePolicy::authenticated("admin.audit")
        .tenant_scoped()
        .roles(&["admin"])
        .permissions(&["audit:read"]);

    let stages = policy.stages();

    assert_eq!(stages.len(), 5);
    assert!(stages.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(stages.first(), Some(&Stage::Authenticate));
}

#[test]
fn given_all_tenant_scoped_policies_when_inspected_then_shop_writes_and_products_are_scoped() {
    for policy in [
        policies::SHOPS_UPDATE,
        policies::SHOPS_DELETE,
        policies::PRODUCTS_LIST,
        policies::PRODUCTS_READ,
        policies::PRODUCTS_CREATE,
        policies::PRODUCTS_UPDATE,
        policies::PRODUCTS_DELETE,
    ] {
        assert!(policy.is_tenant_scoped(), "{} must be tenant-scoped", policy.name());
    }
    for policy in [policies::USERS_ME, policies::SHOPS_CREATE, policies::SHOPS_READ] {
        assert!(!policy.is_tenant_scoped(), "{} must not be tenant-scoped", policy.name());
    }
}
