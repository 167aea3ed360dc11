use crate::commands::{print_json, Context};
use crate::util::{confirm, display_text, parse_contact_id};
use anyhow::Result;
use clap::{ArgAction, Args};
use phonebook_core::Contact;
use phonebook_service::ContactBook;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, allow_hyphen_values = true)]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(allow_hyphen_values = true)]
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long, short, action = ArgAction::SetTrue)]
    pub yes: bool,
}

#[derive(Debug, Serialize)]
struct DeleteReport {
    id: i64,
    deleted: bool,
    remaining: usize,
}

pub async fn add_contact(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let contact = ctx.book.on_submit(&args.name, &args.phone).await?;
    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("created {}", contact_line(&contact));
    }
    Ok(())
}

pub fn list_contacts(ctx: &Context<'_>, _args: ListArgs) -> Result<()> {
    let contacts = ctx.book.on_load()?;

    if ctx.json {
        print_json(&contacts)?;
        return Ok(());
    }

    if contacts.is_empty() {
        println!("no contacts");
        return Ok(());
    }

    for contact in &contacts {
        println!(
            "{}  {}  {}",
            contact.id,
            display_text(&contact.name),
            display_text(&contact.phone)
        );
    }
    Ok(())
}

pub async fn delete_contact(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;

    let current = ctx.book.on_load()?;
    let existing = current.get(id);
    if let Some(contact) = existing {
        let question = format!("Delete contact \"{}\"?", display_text(&contact.name));
        if !args.yes && !confirm(&question)? {
            if ctx.json {
                return print_json(&DeleteReport {
                    id: id.as_i64(),
                    deleted: false,
                    remaining: current.len(),
                });
            }
            println!("cancelled");
            return Ok(());
        }
    }
    let deleted = existing.is_some();

    let remaining = ctx.book.on_delete(id).await?;

    if ctx.json {
        return print_json(&DeleteReport {
            id: id.as_i64(),
            deleted,
            remaining: remaining.len(),
        });
    }

    if deleted {
        println!("deleted {}", id);
    } else {
        println!("no contact with id {}", id);
    }
    Ok(())
}

fn contact_line(contact: &Contact) -> String {
    format!(
        "{} {} {}",
        contact.id,
        display_text(&contact.name),
        display_text(&contact.phone)
    )
}
