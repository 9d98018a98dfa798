//! Command dispatch: maps parsed arguments onto catalog operations

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::CatalogService;
use crate::cli::args::{
    BookArgs, Cli, Commands, ConfigCommands, FindBookArgs, LoanArgs, MemberArgs,
};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Book, BookId, BookQuery, Library, Member, MemberId};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Layered settings, then `--catalog` (or `LIBCAT_CATALOG`) on top.
pub fn load_settings(cli: &Cli, local_dir: Option<&Path>) -> CliResult<Settings> {
    let settings = Settings::load(local_dir)?;
    Ok(match &cli.catalog {
        Some(catalog) => settings.with_catalog(catalog),
        None => settings,
    })
}

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, run `libcat --help`".to_string(),
        ));
    };

    match command {
        Commands::Config { command } => return config_command(command, container),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "libcat", &mut io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let mut catalog = container.catalog_service()?;
    let show_loans = container.settings.output.show_loans;

    match command {
        Commands::AddBook(args) => add_book(&mut catalog, args),
        Commands::RemoveBook { id } => remove_book(&mut catalog, BookId::new(*id)),
        Commands::AddMember(args) => add_member(&mut catalog, args),
        Commands::RemoveMember { id } => remove_member(&mut catalog, MemberId::new(*id)),
        Commands::Lend(args) => lend(&mut catalog, *args),
        Commands::Return(args) => return_book(&mut catalog, *args),
        Commands::FindBook(args) => find_book(&catalog, args, show_loans),
        Commands::FindMember { id } => find_member(&catalog, MemberId::new(*id)),
        Commands::ListBooks { available } => list_books(&catalog, *available, show_loans),
        Commands::ListMembers => list_members(&catalog),
        Commands::Loans { member } => loans(&catalog, MemberId::new(*member)),
        // handled before the catalog is built
        Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip(catalog))]
fn add_book(catalog: &mut CatalogService, args: &BookArgs) -> CliResult<()> {
    let book = Book::new(
        args.id,
        args.title.as_str(),
        args.author.as_str(),
        args.isbn.as_str(),
    );
    let shown = book.to_string();
    catalog.add_book(book)?;
    output::action("Added", &shown);
    Ok(())
}

#[instrument(skip(catalog))]
fn remove_book(catalog: &mut CatalogService, id: BookId) -> CliResult<()> {
    let book = catalog.remove_book(id)?;
    output::action("Removed", &book);
    Ok(())
}

#[instrument(skip(catalog))]
fn add_member(catalog: &mut CatalogService, args: &MemberArgs) -> CliResult<()> {
    let member = Member::new(args.id, args.name.as_str(), args.contact.as_str());
    let shown = member.to_string();
    catalog.add_member(member)?;
    output::action("Registered", &shown);
    Ok(())
}

#[instrument(skip(catalog))]
fn remove_member(catalog: &mut CatalogService, id: MemberId) -> CliResult<()> {
    let member = catalog.remove_member(id)?;
    output::action("Removed", &member);
    Ok(())
}

#[instrument(skip(catalog))]
fn lend(catalog: &mut CatalogService, args: LoanArgs) -> CliResult<()> {
    let (member, book) = (MemberId::new(args.member), BookId::new(args.book));
    catalog.lend_book(member, book)?;
    output::action("Lent", &describe_loan(catalog.library(), member, book));
    Ok(())
}

#[instrument(skip(catalog))]
fn return_book(catalog: &mut CatalogService, args: LoanArgs) -> CliResult<()> {
    let (member, book) = (MemberId::new(args.member), BookId::new(args.book));
    catalog.return_book(member, book)?;
    output::action("Returned", &describe_loan(catalog.library(), member, book));
    Ok(())
}

#[instrument(skip(catalog))]
fn find_book(catalog: &CatalogService, args: &FindBookArgs, show_loans: bool) -> CliResult<()> {
    let query = BookQuery {
        id: args.id.map(BookId::new),
        isbn: args.isbn.clone(),
        author: args.author.clone(),
        title: args.title.clone(),
    };
    if query.is_empty() {
        return Err(CliError::Usage(
            "find-book needs at least one of --id, --isbn, --author, --title".to_string(),
        ));
    }
    let book = catalog.find_book(&query)?;
    output::info(book);
    output::detail(&book_status(catalog.library(), book, show_loans));
    Ok(())
}

#[instrument(skip(catalog))]
fn find_member(catalog: &CatalogService, id: MemberId) -> CliResult<()> {
    let member = catalog.find_member(id)?;
    output::info(member);
    if member.borrowed().is_empty() {
        output::detail("holds no books");
    } else {
        output::detail(&format!(
            "holds book(s): {}",
            member.borrowed().iter().join(", ")
        ));
    }
    Ok(())
}

#[instrument(skip(catalog))]
fn list_books(catalog: &CatalogService, available_only: bool, show_loans: bool) -> CliResult<()> {
    let library = catalog.library();
    let books: Vec<&Book> = if available_only {
        library.available_books().collect()
    } else {
        library.books().collect()
    };
    debug!("list_books: {} of {} books", books.len(), library.len_books());

    output::header(&format!("Books ({})", books.len()));
    for book in books {
        output::detail_note(book, &book_status(library, book, show_loans));
    }
    Ok(())
}

#[instrument(skip(catalog))]
fn list_members(catalog: &CatalogService) -> CliResult<()> {
    let library = catalog.library();
    output::header(&format!("Members ({})", library.len_members()));
    for member in library.members() {
        output::detail_note(member, &format!("{} on loan", member.loan_count()));
    }
    Ok(())
}

#[instrument(skip(catalog))]
fn loans(catalog: &CatalogService, member: MemberId) -> CliResult<()> {
    let books = catalog.borrowed_books(member)?;
    output::header(&format!("Loans of member {} ({})", member, books.len()));
    for book in books {
        output::detail(book);
    }
    Ok(())
}

fn book_status(library: &Library, book: &Book, show_loans: bool) -> String {
    if book.is_available() {
        return "available".to_string();
    }
    match library.borrower_of(book.id) {
        Some(holder) if show_loans => format!("on loan to {} ({})", holder.name, holder.id),
        _ => "on loan".to_string(),
    }
}

fn describe_loan(library: &Library, member: MemberId, book: BookId) -> String {
    let title = library
        .book(book)
        .map(|b| format!("'{}' ({})", b.title, b.id))
        .unwrap_or_else(|| format!("book {book}"));
    let name = library
        .member(member)
        .map(|m| format!("{} ({})", m.name, m.id))
        .unwrap_or_else(|| format!("member {member}"));
    format!("{title} / {name}")
}

fn config_command(command: &ConfigCommands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let cwd = current_dir()?;
            match global_config_path() {
                Some(path) => output::detail_note(&path.display(), exists_note(container, &path)),
                None => output::warning("no global config directory on this platform"),
            }
            let local = local_config_path(&cwd);
            output::detail_note(&local.display(), exists_note(container, &local));
            Ok(())
        }
        ConfigCommands::Init { global, force } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no global config directory on this platform".to_string())
                })?
            } else {
                local_config_path(&current_dir()?)
            };
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|()| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
            Ok(())
        }
    }
}

fn exists_note(container: &ServiceContainer, path: &Path) -> &'static str {
    if container.fs.exists(path) {
        "(exists)"
    } else {
        "(not found)"
    }
}

fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir()
        .map_err(|e| InfraError::io("determine working directory", e).into())
}
