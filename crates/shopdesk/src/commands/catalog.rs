//! Handlers for the plain CRUD resources: product masters, categories,
//! suppliers, and warehouses.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tabled::Tabled;

use shopdesk_api::services::{CrudService, Resource};
use shopdesk_api::{Category, EntityId, ProductMaster, Supplier, Warehouse};

use crate::cli::{CatalogArgs, CatalogCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

/// How a catalog resource is shown on the command line.
pub trait Listing: Resource + Serialize {
    /// Singular noun for messages ("category").
    const NOUN: &'static str;
    type Row: Tabled;

    fn id(&self) -> &EntityId;
    fn row(&self, color: bool) -> Self::Row;
    fn detail(&self) -> String;
}

// ── Rows ────────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct MasterRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl Listing for ProductMaster {
    const NOUN: &'static str = "product master";
    type Row = MasterRow;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn row(&self, color: bool) -> MasterRow {
        MasterRow {
            id: self.id.to_string(),
            sku: self.sku.clone().unwrap_or_default(),
            name: self.name.clone(),
            price: util::opt_string(self.price.as_ref()),
            status: self
                .status
                .map(|s| output::paint_status(&s.to_string(), color))
                .unwrap_or_default(),
        }
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("SKU", self.sku.clone().unwrap_or_default()),
            ("Name", self.name.clone()),
            ("Description", self.description.clone().unwrap_or_default()),
            ("Price", util::opt_string(self.price.as_ref())),
            ("Cost", util::opt_string(self.cost_price.as_ref())),
            ("Sale price", util::opt_string(self.sale_price.as_ref())),
            ("Stock", util::opt_string(self.stock.as_ref())),
            ("Status", util::opt_string(self.status.as_ref())),
            ("Category", util::opt_string(self.category_id.as_ref())),
            ("Image", self.image.clone().unwrap_or_default()),
        ])
    }
}

#[derive(Tabled)]
pub struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Parent")]
    parent: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl Listing for Category {
    const NOUN: &'static str = "category";
    type Row = CategoryRow;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn row(&self, _color: bool) -> CategoryRow {
        CategoryRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            parent: util::opt_string(self.parent_id.as_ref()),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Parent", util::opt_string(self.parent_id.as_ref())),
            ("Description", self.description.clone().unwrap_or_default()),
        ])
    }
}

#[derive(Tabled)]
pub struct SupplierRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Contact")]
    contact: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

impl Listing for Supplier {
    const NOUN: &'static str = "supplier";
    type Row = SupplierRow;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn row(&self, _color: bool) -> SupplierRow {
        SupplierRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            contact: self.contact_name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
        }
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Contact", self.contact_name.clone().unwrap_or_default()),
            ("Email", self.email.clone().unwrap_or_default()),
            ("Phone", self.phone.clone().unwrap_or_default()),
            ("Address", self.address.clone().unwrap_or_default()),
        ])
    }
}

#[derive(Tabled)]
pub struct WarehouseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Capacity")]
    capacity: String,
    #[tabled(rename = "Shop")]
    shop: String,
}

impl Listing for Warehouse {
    const NOUN: &'static str = "warehouse";
    type Row = WarehouseRow;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn row(&self, _color: bool) -> WarehouseRow {
        WarehouseRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            location: self.location.clone().unwrap_or_default(),
            capacity: util::opt_string(self.capacity.as_ref()),
            shop: util::opt_string(self.shop_id.as_ref()),
        }
    }

    fn detail(&self) -> String {
        output::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Location", self.location.clone().unwrap_or_default()),
            ("Capacity", util::opt_string(self.capacity.as_ref())),
            ("Shop", util::opt_string(self.shop_id.as_ref())),
        ])
    }
}

// ── Handler ─────────────────────────────────────────────────────────

fn print_one<T: Listing>(item: &T, global: &GlobalOpts) {
    let out = output::render_single(&global.output, item, T::detail, |x| x.id().to_string());
    output::print_output(&out, global.quiet);
}

pub async fn handle<T>(
    service: &CrudService<T>,
    args: CatalogArgs,
    global: &GlobalOpts,
) -> Result<(), CliError>
where
    T: Listing,
    T::Input: DeserializeOwned,
{
    let color = output::should_color(&global.color);
    match args.command {
        CatalogCommand::List(list) => {
            let query = util::list_query(&list);
            let items = if list.all {
                service.list_all(&query).await?
            } else {
                service.list(&query).await?.items
            };
            let out = output::render_list(
                &global.output,
                &items,
                |x| x.row(color),
                |x| x.id().to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CatalogCommand::Get { id } => {
            let item = service.get(&util::entity_id(&id)).await?;
            print_one(&item, global);
            Ok(())
        }

        CatalogCommand::Create(fields) => {
            let input: T::Input = util::named_payload(&fields)?.build_nonempty(T::NOUN)?;
            let item = service.create(&input).await?;
            output::note(&format!("✓ Created {} {}", T::NOUN, item.id()), global.quiet);
            print_one(&item, global);
            Ok(())
        }

        CatalogCommand::Update { id, fields } => {
            let input: T::Input = util::named_payload(&fields)?.build_nonempty(T::NOUN)?;
            let item = service.update(&util::entity_id(&id), &input).await?;
            print_one(&item, global);
            Ok(())
        }

        CatalogCommand::Delete { id } => {
            if !util::confirm(&format!("Delete {} {id}?", T::NOUN), global.yes)? {
                return Ok(());
            }
            service.delete(&util::entity_id(&id)).await?;
            output::note(&format!("Deleted {} {id}", T::NOUN), global.quiet);
            Ok(())
        }
    }
}
