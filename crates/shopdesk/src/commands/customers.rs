//! Customer command handlers.

use tabled::Tabled;

use shopdesk_api::{CoreApi, Customer, CustomerRegistration};

use crate::cli::{CustomersArgs, CustomersCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

fn to_row(c: &Customer, color: bool) -> CustomerRow {
    CustomerRow {
        id: c.id.to_string(),
        name: c.name.clone(),
        email: c.email.clone().unwrap_or_default(),
        phone: c.phone.clone().unwrap_or_default(),
        status: c
            .status
            .map(|s| output::paint_status(&s.to_string(), color))
            .unwrap_or_default(),
        registered: c
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    }
}

fn detail(c: &Customer) -> String {
    output::detail_lines(&[
        ("ID", c.id.to_string()),
        ("Name", c.name.clone()),
        ("Email", c.email.clone().unwrap_or_default()),
        ("Phone", c.phone.clone().unwrap_or_default()),
        ("Address", c.address.clone().unwrap_or_default()),
        ("Status", util::opt_string(c.status.as_ref())),
        ("Shop", util::opt_string(c.shop_id.as_ref())),
        (
            "Registered",
            c.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ),
    ])
}

fn print_customer(c: &Customer, global: &GlobalOpts) {
    let out = output::render_single(&global.output, c, detail, |c| c.id.to_string());
    output::print_output(&out, global.quiet);
}

pub async fn handle(
    api: &CoreApi,
    args: CustomersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    match args.command {
        CustomersCommand::List { shop, list } => {
            let mut query = util::list_query(&list);
            if let Some(ref shop) = shop {
                query = query.shop(util::entity_id(shop));
            }
            let customers = if list.all {
                api.customers().list_all(&query).await?
            } else {
                api.customers().list(&query).await?.items
            };
            let out = output::render_list(
                &global.output,
                &customers,
                |c| to_row(c, color),
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CustomersCommand::Get { id } => {
            let customer = api.customers().get(&util::entity_id(&id)).await?;
            print_customer(&customer, global);
            Ok(())
        }

        CustomersCommand::Register {
            shop_slug,
            name,
            email,
            phone,
            address,
        } => {
            let registration = CustomerRegistration {
                shop_slug,
                name,
                email,
                phone,
                address,
            };
            let customer = api.customers().register(&registration).await?;
            output::note(
                &format!("✓ Registration {} submitted, awaiting approval", customer.id),
                global.quiet,
            );
            print_customer(&customer, global);
            Ok(())
        }

        CustomersCommand::Approve { id } => {
            let customer = api.customers().approve(&util::entity_id(&id)).await?;
            output::note(&format!("✓ Customer {} approved", customer.id), global.quiet);
            print_customer(&customer, global);
            Ok(())
        }

        CustomersCommand::Reject { id, reason } => {
            let customer = api
                .customers()
                .reject(&util::entity_id(&id), reason)
                .await?;
            output::note(&format!("Customer {} rejected", customer.id), global.quiet);
            print_customer(&customer, global);
            Ok(())
        }

        CustomersCommand::Delete { id } => {
            if !util::confirm(&format!("Delete customer {id}?"), global.yes)? {
                return Ok(());
            }
            api.customers().delete(&util::entity_id(&id)).await?;
            output::note("Customer deleted", global.quiet);
            Ok(())
        }
    }
}
