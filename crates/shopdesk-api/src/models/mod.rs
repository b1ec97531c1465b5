// ── Domain model ──
//
// Typed shapes for the backend's JSON resources. Wire names are camelCase;
// enumerations are SCREAMING_SNAKE_CASE with an `Unknown` catch-all so a
// new backend value never fails a whole listing.

pub mod account;
pub mod catalog;
pub mod customer;
pub mod employee;
pub mod entity_id;
pub mod product;
pub mod shop;

pub use account::{LoginResponse, OwnerRegistration, ProfileUpdate, Setting, UserProfile};
pub use catalog::{Category, CategoryInput, Supplier, SupplierInput, Warehouse, WarehouseInput};
pub use customer::{Customer, CustomerRegistration, CustomerStatus, Rejection};
pub use employee::{Employee, EmployeeInput, EmployeeRole, EmployeeStatus};
pub use entity_id::EntityId;
pub use product::{Product, ProductInput, ProductMaster, ProductStatus};
pub use shop::{OpeningHours, Shop, ShopConfig, ShopConfigPatch, ShopInput};
