//! Access policy of every protected route

use crate::RoutePolicy;

pub const SHOP_CREATE: &str = "shop:create";
pub const SHOP_READ: &str = "shop:read";
pub const SHOP_UPDATE: &str = "shop:update";
pub const SHOP_DELETE: &str = "shop:delete";
pub const PRODUCT_CREATE: &str = "product:create";
pub const PRODUCT_READ: &str = "product:read";
pub const PRODUCT_UPDATE: &str = "product:update";
pub const PRODUCT_DELETE: &str = "product:delete";

pub const USERS_ME: RoutePolicy = RoutePolicy::authenticated("users.me");

pub const SHOPS_CREATE: RoutePolicy =
    RoutePolicy::authenticated("shops.create").permissions(&[SHOP_CREATE]);
pub const SHOPS_READ: RoutePolicy =
    RoutePolicy::authenticated("shops.read").permissions(&[SHOP_READ]);
pub const SHOPS_UPDATE: RoutePolicy = RoutePolicy::authenticated("shops.update")
    .tenant_scoped()
    .permissions(&[SHOP_UPDATE]);
pub const SHOPS_DELETE: RoutePolicy = RoutePolicy::authenticated("shops.delete")
    .tenant_scoped()
    .permissions(&[SHOP_DELETE]);

pub const PRODUCTS_LIST: RoutePolicy = RoutePolicy::authenticated("products.list")
    .tenant_scoped()
    .permissions(&[PRODUCT_READ]);
pub const PRODUCTS_READ: RoutePolicy = RoutePolicy::authenticated("products.read")
    .tenant_scoped()
    .permissions(&[PRODUCT_READ]);
pub const PRODUCTS_CREATE: RoutePolicy = RoutePolicy::authenticated("products.create")
    .tenant_scoped()
    .permissions(&[PRODUCT_CREATE]);
pub const PRODUCTS_UPDATE: RoutePolicy = RoutePolicy::authenticated("products.update")
    .tenant_scoped()
    .permissions(&[PRODUCT_UPDATE]);
pub const PRODUCTS_DELETE: RoutePolicy = RoutePolicy::authenticated("products.delete")
    .tenant_scoped()
    .permissions(&[PRODUCT_DELETE]);
