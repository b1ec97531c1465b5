//! Employee command handlers.

use tabled::Tabled;

use shopdesk_api::{CoreApi, Employee, EmployeeInput, EmployeeRole, EmployeeStatus};

use crate::cli::{
    EmployeeFields, EmployeeRoleArg, EmployeeStatusArg, EmployeesArgs, EmployeesCommand,
    GlobalOpts,
};
use crate::error::CliError;
use crate::output;

use super::util::{self, Payload};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Roles")]
    roles: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn roles_label(roles: &[EmployeeRole]) -> String {
    roles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn to_row(e: &Employee, color: bool) -> EmployeeRow {
    EmployeeRow {
        id: e.id.to_string(),
        name: e.name.clone(),
        email: e.email.clone().unwrap_or_default(),
        roles: roles_label(&e.roles),
        status: e
            .status
            .map(|s| output::paint_status(&s.to_string(), color))
            .unwrap_or_default(),
    }
}

fn detail(e: &Employee) -> String {
    output::detail_lines(&[
        ("ID", e.id.to_string()),
        ("Name", e.name.clone()),
        ("Email", e.email.clone().unwrap_or_default()),
        ("Phone", e.phone.clone().unwrap_or_default()),
        ("Roles", roles_label(&e.roles)),
        ("Status", util::opt_string(e.status.as_ref())),
        ("Shop", util::opt_string(e.shop_id.as_ref())),
    ])
}

fn role(arg: EmployeeRoleArg) -> EmployeeRole {
    match arg {
        EmployeeRoleArg::Manager => EmployeeRole::Manager,
        EmployeeRoleArg::Cashier => EmployeeRole::Cashier,
        EmployeeRoleArg::StockKeeper => EmployeeRole::StockKeeper,
        EmployeeRoleArg::Staff => EmployeeRole::Staff,
    }
}

fn status(arg: EmployeeStatusArg) -> EmployeeStatus {
    match arg {
        EmployeeStatusArg::Active => EmployeeStatus::Active,
        EmployeeStatusArg::Inactive => EmployeeStatus::Inactive,
        EmployeeStatusArg::Suspended => EmployeeStatus::Suspended,
    }
}

fn employee_input(fields: &EmployeeFields) -> Result<EmployeeInput, CliError> {
    let roles: Vec<EmployeeRole> = fields.roles.iter().copied().map(role).collect();
    let password = if fields.set_password {
        let pass = rpassword::prompt_password("Initial password: ").map_err(util::prompt_err)?;
        if pass.is_empty() {
            return Err(CliError::Validation {
                field: "password".into(),
                reason: "password cannot be empty".into(),
            });
        }
        Some(pass)
    } else {
        None
    };

    let mut payload = Payload::from_args(&fields.payload)?
        .opt("name", fields.name.clone())
        .opt("email", fields.email.clone())
        .opt("phone", fields.phone.clone())
        .opt("password", password);
    if !roles.is_empty() {
        let roles = serde_json::to_value(&roles)?;
        payload = payload.opt("roles", Some(roles));
    }
    payload.build_nonempty("employee")
}

fn print_employee(e: &Employee, global: &GlobalOpts) {
    let out = output::render_single(&global.output, e, detail, |e| e.id.to_string());
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    api: &CoreApi,
    args: EmployeesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    match args.command {
        EmployeesCommand::List { shop, list } => {
            let shop = util::entity_id(&shop);
            let query = util::list_query(&list);
            let employees = if list.all {
                api.employees().list_all(&shop, &query).await?
            } else {
                api.employees().list(&shop, &query).await?.items
            };
            let out = output::render_list(
                &global.output,
                &employees,
                |e| to_row(e, color),
                |e| e.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        EmployeesCommand::Get { id } => {
            let employee = api.employees().get(&util::entity_id(&id)).await?;
            print_employee(&employee, global);
            Ok(())
        }

        EmployeesCommand::Add { shop, fields } => {
            let input = employee_input(&fields)?;
            let employee = api
                .employees()
                .create(&util::entity_id(&shop), &input)
                .await?;
            output::note(&format!("✓ Employee {} added", employee.id), global.quiet);
            print_employee(&employee, global);
            Ok(())
        }

        EmployeesCommand::Update { id, fields } => {
            let input = employee_input(&fields)?;
            let employee = api
                .employees()
                .update(&util::entity_id(&id), &input)
                .await?;
            print_employee(&employee, global);
            Ok(())
        }

        EmployeesCommand::Status { id, status: arg } => {
            let employee = api
                .employees()
                .set_status(&util::entity_id(&id), status(arg))
                .await?;
            output::note(
                &format!("✓ Employee {} is now {}", employee.id, status(arg)),
                global.quiet,
            );
            print_employee(&employee, global);
            Ok(())
        }

        EmployeesCommand::Remove { id } => {
            if !util::confirm(&format!("Remove employee {id}?"), global.yes)? {
                return Ok(());
            }
            api.employees().delete(&util::entity_id(&id)).await?;
            output::note("Employee removed", global.quiet);
            Ok(())
        }
    }
}
