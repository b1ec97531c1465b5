//! Shop command handlers.

use tabled::Tabled;

use shopdesk_api::services::ShopImage;
use shopdesk_api::{CoreApi, EntityId, Shop, ShopConfig, ShopConfigPatch, ShopInput};

use crate::cli::{GlobalOpts, ShopConfigFields, ShopFields, ShopsArgs, ShopsCommand};
use crate::error::CliError;
use crate::output;

use super::util::{self, Payload};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ShopRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
}

impl From<&Shop> for ShopRow {
    fn from(s: &Shop) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            slug: s.slug.clone().unwrap_or_default(),
            email: s.email.clone().unwrap_or_default(),
            phone: s.phone.clone().unwrap_or_default(),
        }
    }
}

fn detail(s: &Shop) -> String {
    output::detail_lines(&[
        ("ID", s.id.to_string()),
        ("Name", s.name.clone()),
        ("Slug", s.slug.clone().unwrap_or_default()),
        ("Email", s.email.clone().unwrap_or_default()),
        ("Phone", s.phone.clone().unwrap_or_default()),
        ("Description", s.description.clone().unwrap_or_default()),
        ("Owner", util::opt_string(s.owner_id.as_ref())),
        ("Avatar", s.avatar.clone().unwrap_or_default()),
        ("Cover", s.cover.clone().unwrap_or_default()),
    ])
}

fn config_detail(c: &ShopConfig) -> String {
    let hours = c
        .opening_hours
        .as_ref()
        .map(|h| {
            format!(
                "{} - {}",
                h.open.as_deref().unwrap_or("?"),
                h.close.as_deref().unwrap_or("?")
            )
        })
        .unwrap_or_default();
    let mut lines = vec![
        ("Address", c.address.clone().unwrap_or_default()),
        ("Latitude", util::opt_string(c.latitude.as_ref())),
        ("Longitude", util::opt_string(c.longitude.as_ref())),
        ("Hours", hours),
        ("Active", util::opt_string(c.is_active.as_ref())),
        ("Email alerts", util::opt_string(c.notify_email.as_ref())),
        ("SMS alerts", util::opt_string(c.notify_sms.as_ref())),
        ("Locale", c.locale.clone().unwrap_or_default()),
        ("Currency", c.currency.clone().unwrap_or_default()),
        ("Theme", c.theme.clone().unwrap_or_default()),
    ];
    let extra: Vec<_> = c.extra.keys().cloned().collect();
    if !extra.is_empty() {
        lines.push(("Other keys", extra.join(", ")));
    }
    output::detail_lines(&lines)
}

fn shop_payload(fields: &ShopFields) -> Result<Payload, CliError> {
    Ok(Payload::from_args(&fields.payload)?
        .opt("name", fields.name.clone())
        .opt("slug", fields.slug.clone())
        .opt("email", fields.email.clone())
        .opt("phone", fields.phone.clone())
        .opt("description", fields.description.clone()))
}

fn config_patch(fields: ShopConfigFields) -> ShopConfigPatch {
    ShopConfigPatch {
        address: fields.address,
        latitude: fields.latitude,
        longitude: fields.longitude,
        open: fields.open,
        close: fields.close,
        is_active: fields.active,
        notify_email: fields.notify_email,
        notify_sms: fields.notify_sms,
        locale: fields.locale,
        currency: fields.currency,
        theme: fields.theme,
    }
}

fn print_shop(shop: &Shop, global: &GlobalOpts) {
    let out = output::render_single(&global.output, shop, detail, |s| s.id.to_string());
    output::print_output(&out, global.quiet);
}

async fn upload(
    api: &CoreApi,
    id: &str,
    file: &std::path::Path,
    slot: ShopImage,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let image = util::load_image(file)?;
    let shop = api
        .shops()
        .upload_image(&util::entity_id(id), slot, image)
        .await?;
    output::note(&format!("✓ {slot} uploaded"), global.quiet);
    print_shop(&shop, global);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(api: &CoreApi, args: ShopsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ShopsCommand::List(list) => {
            let query = util::list_query(&list);
            let shops = if list.all {
                api.shops().list_all(&query).await?
            } else {
                api.shops().list(&query).await?.items
            };
            let out = output::render_list(&global.output, &shops, |s| ShopRow::from(s), |s| {
                s.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShopsCommand::Get { id } => {
            let shop = api.shops().get_shop_by_id(&util::entity_id(&id)).await?;
            print_shop(&shop, global);
            Ok(())
        }

        ShopsCommand::Mine { owner, list } => {
            let owner: EntityId = match owner {
                Some(o) => util::entity_id(&o),
                None => api
                    .require_session()?
                    .user_id
                    .map(EntityId::from)
                    .ok_or_else(|| CliError::Validation {
                        field: "owner".into(),
                        reason: "session has no user id; pass --owner".into(),
                    })?,
            };
            let page = api
                .shops()
                .list_by_owner(&owner, &util::list_query(&list))
                .await?;
            let out = output::render_list(&global.output, &page.items, |s| ShopRow::from(s), |s| {
                s.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShopsCommand::Create(fields) => {
            let input: ShopInput = shop_payload(&fields)?.build_nonempty("shop")?;
            let shop = api.shops().create(&input).await?;
            output::note(&format!("✓ Shop {} created", shop.id), global.quiet);
            print_shop(&shop, global);
            Ok(())
        }

        ShopsCommand::Update { id, fields } => {
            let input: ShopInput = shop_payload(&fields)?.build_nonempty("shop")?;
            let shop = api.shops().update(&util::entity_id(&id), &input).await?;
            print_shop(&shop, global);
            Ok(())
        }

        ShopsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete shop {id}? Its products and staff go with it."),
                global.yes,
            )? {
                return Ok(());
            }
            api.shops().delete(&util::entity_id(&id)).await?;
            output::note("Shop deleted", global.quiet);
            Ok(())
        }

        ShopsCommand::Config { id } => {
            let config = api.shops().get_config(&util::entity_id(&id)).await?;
            let out = output::render_single(&global.output, &config, config_detail, |_| {
                id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShopsCommand::SetConfig { id, fields } => {
            let config = api
                .shops()
                .patch_config(&util::entity_id(&id), config_patch(fields))
                .await?;
            output::note("✓ Shop configuration saved", global.quiet);
            let out = output::render_single(&global.output, &config, config_detail, |_| {
                id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ShopsCommand::UploadAvatar { id, file } => {
            upload(api, &id, &file, ShopImage::Avatar, global).await
        }

        ShopsCommand::UploadCover { id, file } => {
            upload(api, &id, &file, ShopImage::Cover, global).await
        }

        ShopsCommand::JoinLink { id } => {
            let shop = api.shops().get_shop_by_id(&util::entity_id(&id)).await?;
            let link = api.join_link(&shop)?;
            output::print_output(link.as_str(), global.quiet);
            Ok(())
        }
    }
}
