use crate::*;

fn listing_row(l: &Listing) -> String {
    format!("{}\t{}\t{}\t{}", l.id, l.title, l.price, l.category)
}

pub fn handle_catalog_commands(cli: &Cli, state: &mut State, api: &Api) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Browse {
            term,
            category,
            price,
            sort,
            favorites,
        } => {
            let catalog = load_catalog(api);
            let filter = FilterState {
                category: category.clone(),
                price: *price,
                search_term: term.clone().unwrap_or_default(),
                sort: *sort,
            };
            let mut view = derive_view(&catalog, &filter);
            if *favorites {
                let set = set_from_state(state);
                view.retain(|l| set.contains(&l.id));
            }
            print_out(cli.json, &view, listing_row)?;
        }
        Commands::Search { query } => {
            let catalog = load_catalog(api);
            let results = visible_listings(api, &catalog, query.as_deref());
            print_out(cli.json, &results, listing_row)?;
        }
        Commands::Show { id } => {
            let catalog = load_catalog(api);
            let listing = find_listing(&catalog, id)?;
            let (contact_kind, contact_value) =
                parse_contact(listing.contact.as_deref().unwrap_or(""));
            let detail = ListingDetail {
                listing: listing.clone(),
                image_url: api.image_url(&listing.image),
                contact_kind: contact_kind.to_string(),
                contact_value: contact_value.to_string(),
            };
            print_one(cli.json, detail, |d| {
                let mut lines = vec![
                    format!("title: {}", d.listing.title),
                    format!("price: {}", d.listing.price),
                    format!("category: {}", d.listing.category),
                ];
                if !d.listing.description.is_empty() {
                    lines.push(format!("description: {}", d.listing.description));
                }
                lines.push(format!("image: {}", d.image_url));
                if !d.contact_value.is_empty() {
                    lines.push(format!("contact: {} {}", d.contact_kind, d.contact_value));
                }
                lines.join("\n")
            })?;
        }
        Commands::Favorite { id } => {
            let set = set_from_state(state);
            let next = toggle(set, id);
            let favorited = next.contains(id.as_str());
            let favorite_count = next.len();
            set_into_state(next, state);
            save_state(state)?;
            audit(
                "favorite",
                serde_json::json!({"id": id, "favorited": favorited}),
            );
            let report = FavoriteReport {
                id: id.clone(),
                favorited,
                favorite_count,
            };
            print_one(cli.json, report, |r| {
                if r.favorited {
                    format!("favorited {}", r.id)
                } else {
                    format!("unfavorited {}", r.id)
                }
            })?;
        }
        Commands::Favorites => {
            let catalog = load_catalog(api);
            let set = set_from_state(state);
            let favorites: Vec<Listing> = derive_view(&catalog, &FilterState::default())
                .into_iter()
                .filter(|l| set.contains(&l.id))
                .collect();
            print_out(cli.json, &favorites, listing_row)?;
        }
        Commands::Categories => {
            let catalog = load_catalog(api);
            let counts: Vec<CategoryCount> = distinct_categories(&catalog)
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect();
            print_out(cli.json, &counts, |c| format!("{}\t{}", c.category, c.count))?;
        }
        Commands::Refresh => {
            let listings = refresh_catalog(api)?;
            let report = RefreshReport {
                listings,
                source: api.base().to_string(),
            };
            print_one(cli.json, report, |r| {
                format!("refreshed {} listings from {}", r.listings, r.source)
            })?;
        }
        Commands::Sell {
            title,
            price,
            description,
            category,
            contact,
            photo,
        } => {
            let created = api.create_listing(title, price, description, category, contact, photo)?;
            audit(
                "sell",
                serde_json::json!({"product_id": created.product_id, "title": title}),
            );
            print_one(cli.json, created, |c| {
                format!("listed {} as {}", title, c.product_id)
            })?;
        }
        Commands::Login { .. }
        | Commands::Register { .. }
        | Commands::Logout
        | Commands::Whoami
        | Commands::Profile { .. } => {
            unreachable!("handled by the account command tree")
        }
    }

    Ok(())
}
