use crate::catalog;
use crate::cli::SearchArgs;
use crate::config::Config;
use crate::CliError;
use addonhub_core::handler::addons::{build_query, SearchAddonsQueryParams};
use addonhub_core::pagination::Page;
use addonhub_core::types::addon::Addon;
use addonhub_core::SearchApiError;
use prettytable::{row, Table};
use std::collections::HashMap;

pub fn format_addons_table(page: &Page<Addon>) {
    let mut table = Table::new();

    table.add_row(row![bF=>
        "ID",
        "Name",
        "Type",
        "Daily Users",
        "Weekly Downloads",
        "Created",
    ]);

    for addon in page.iter() {
        table.add_row(row![
            addon.id,
            format!("{}\n{}", addon.name, addon.slug),
            addon.addon_type,
            addon.average_daily_users,
            addon.weekly_downloads,
            addon.created.format("%Y-%m-%d"),
        ]);
    }

    table.printstd();

    if page.count() == 0 {
        println!("\nNo add-ons matched.");
    } else {
        println!(
            "\nShowing {}-{} of {} (page {} of {})",
            page.start_index(),
            page.end_index(),
            page.count(),
            page.number(),
            page.num_pages()
        );
    }
    if let Some(next) = page.next_page_number() {
        println!("Next page: --page {next}");
    }
}

pub fn handle_search(config: Config, args: SearchArgs) -> Result<(), CliError> {
    let index = catalog::load_catalog(&config)?;
    let pagination = &config.pagination;

    let search_params = SearchAddonsQueryParams {
        q: args.query,
        addon_type: args.addon_type,
        sort: args.sort,
    };
    let query = build_query(&index, &search_params)?;

    let mut params = HashMap::new();
    params.insert(pagination.page_query_param.clone(), args.page);
    if let Some(page_size) = args.page_size {
        params.insert(pagination.page_size_query_param.clone(), page_size.to_string());
    }

    let page = pagination
        .paginate_search(query, &params)
        .map_err(SearchApiError::from)?;

    match args.output.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        _ => {
            format_addons_table(&page);
        }
    }
    Ok(())
}
