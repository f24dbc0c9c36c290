mod backup;
mod caja;
mod cli;
mod closeout;
mod db;
mod error;
mod fmt;
mod models;
mod reports;
mod settings;
mod store;
mod summary;
mod ventas;

use clap::Parser;

use cli::{CajaCommands, Cli, ClientsCommands, Commands, ProductsCommands, StaffCommands, VentasCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Clients { command } => match command {
            ClientsCommands::Add {
                name,
                phone,
                local,
                modalidad,
            } => cli::clients::add(&name, &phone, &local, &modalidad),
            ClientsCommands::List { search } => cli::clients::list(search.as_deref()),
            ClientsCommands::Update {
                id,
                name,
                phone,
                local,
                modalidad,
            } => cli::clients::update(id, name.as_deref(), phone.as_deref(), local.as_deref(), modalidad.as_deref()),
            ClientsCommands::Delete { id, yes } => cli::clients::delete(id, yes),
        },
        Commands::Staff { command } => match command {
            StaffCommands::Add { name } => cli::staff::add(&name),
            StaffCommands::List { search } => cli::staff::list(search.as_deref()),
            StaffCommands::Update { id, name } => cli::staff::update(id, &name),
            StaffCommands::Delete { id, yes } => cli::staff::delete(id, yes),
        },
        Commands::Products { command } => match command {
            ProductsCommands::Add {
                name,
                price,
                category,
            } => cli::products::add(&name, &category, price),
            ProductsCommands::List { search } => cli::products::list(search.as_deref()),
            ProductsCommands::Update {
                id,
                name,
                price,
                category,
            } => cli::products::update(id, name.as_deref(), category.as_deref(), price),
            ProductsCommands::Delete { id, yes } => cli::products::delete(id, yes),
        },
        Commands::Ventas { command } => match command {
            VentasCommands::Add {
                client,
                product,
                staff,
                quantity,
            } => cli::ventas::add(&client, &product, &staff, quantity),
            VentasCommands::List { date } => cli::ventas::list(date.as_deref()),
            VentasCommands::Delete { id, yes } => cli::ventas::delete(id, yes),
        },
        Commands::Caja { command } => match command {
            CajaCommands::Add {
                description,
                amount,
                kind,
            } => cli::caja::add(&description, amount, &kind),
            CajaCommands::List { date } => cli::caja::list(date.as_deref()),
            CajaCommands::Balance => cli::caja::balance(),
            CajaCommands::Delete { id, yes } => cli::caja::delete(id, yes),
        },
        Commands::Report {
            date,
            staff,
            search,
            csv,
            settle,
            summary,
        } => cli::report::run(date.as_deref(), &staff, search.as_deref(), csv.as_deref(), settle, summary),
        Commands::Closeout { date, counted } => cli::closeout::run(date.as_deref(), counted),
        Commands::Backup { output } => cli::backup::backup(output.as_deref()),
        Commands::Restore { file, yes } => cli::backup::restore(&file, yes),
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
