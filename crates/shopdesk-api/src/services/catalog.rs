// Category, supplier and warehouse endpoints: plain CRUD.

use super::crud::{CrudService, Resource};
use crate::models::{Category, CategoryInput, Supplier, SupplierInput, Warehouse, WarehouseInput};

pub type CategoryService = CrudService<Category>;
pub type SupplierService = CrudService<Supplier>;
pub type WarehouseService = CrudService<Warehouse>;

impl Resource for Category {
    const PATH: &'static str = "category";
    type Input = CategoryInput;
}

impl Resource for Supplier {
    const PATH: &'static str = "supplier";
    type Input = SupplierInput;
}

impl Resource for Warehouse {
    const PATH: &'static str = "warehouse";
    type Input = WarehouseInput;
}
