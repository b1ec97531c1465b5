//! Shop product command handlers.

use tabled::Tabled;

use shopdesk_api::{CoreApi, Product, ProductInput};

use crate::cli::{GlobalOpts, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn to_row(p: &Product, color: bool) -> ProductRow {
    ProductRow {
        id: p.id.to_string(),
        sku: p.sku.clone().unwrap_or_default(),
        name: p.name.clone(),
        price: util::opt_string(p.sale_price.as_ref().or(p.price.as_ref())),
        stock: util::opt_string(p.stock.as_ref()),
        status: p
            .status
            .map(|s| output::paint_status(&s.to_string(), color))
            .unwrap_or_default(),
    }
}

fn detail(p: &Product) -> String {
    output::detail_lines(&[
        ("ID", p.id.to_string()),
        ("SKU", p.sku.clone().unwrap_or_default()),
        ("Name", p.name.clone()),
        ("Description", p.description.clone().unwrap_or_default()),
        ("Price", util::opt_string(p.price.as_ref())),
        ("Cost", util::opt_string(p.cost_price.as_ref())),
        ("Sale price", util::opt_string(p.sale_price.as_ref())),
        ("Stock", util::opt_string(p.stock.as_ref())),
        ("Status", util::opt_string(p.status.as_ref())),
        ("Category", util::opt_string(p.category_id.as_ref())),
        ("Shop", util::opt_string(p.shop_id.as_ref())),
        ("Master", util::opt_string(p.master_id.as_ref())),
        ("Image", p.image.clone().unwrap_or_default()),
    ])
}

fn print_product(p: &Product, global: &GlobalOpts) {
    let out = output::render_single(&global.output, p, detail, |p| p.id.to_string());
    output::print_output(&out, global.quiet);
}

pub async fn handle(api: &CoreApi, args: ProductsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    match args.command {
        ProductsCommand::List { shop, list } => {
            let mut query = util::list_query(&list);
            if let Some(ref shop) = shop {
                query = query.shop(util::entity_id(shop));
            }
            let products = if list.all {
                api.products().list_all(&query).await?
            } else {
                api.products().list(&query).await?.items
            };
            let out = output::render_list(
                &global.output,
                &products,
                |p| to_row(p, color),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Get { id } => {
            let product = api.products().get(&util::entity_id(&id)).await?;
            print_product(&product, global);
            Ok(())
        }

        ProductsCommand::Create(fields) => {
            let input: ProductInput = util::named_payload(&fields)?.build_nonempty("product")?;
            let product = api.products().create(&input).await?;
            output::note(&format!("✓ Product {} created", product.id), global.quiet);
            print_product(&product, global);
            Ok(())
        }

        ProductsCommand::Update { id, fields } => {
            let input: ProductInput = util::named_payload(&fields)?.build_nonempty("product")?;
            let product = api
                .products()
                .update(&util::entity_id(&id), &input)
                .await?;
            print_product(&product, global);
            Ok(())
        }

        ProductsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete product {id}?"), global.yes)? {
                return Ok(());
            }
            api.products().delete(&util::entity_id(&id)).await?;
            output::note("Product deleted", global.quiet);
            Ok(())
        }

        ProductsCommand::UploadImage { id, file } => {
            let image = util::load_image(&file)?;
            let product = api
                .products()
                .upload_image(&util::entity_id(&id), image)
                .await?;
            output::note("✓ Image uploaded", global.quiet);
            print_product(&product, global);
            Ok(())
        }
    }
}
