use crate::config::Config;
use crate::errors::AppResult;
use crate::models::catalog::{DYE_COLORS, TANKS, VESSELS};
use crate::ui::messages::header;
use crate::utils::table::Table;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let sep = cfg.separator_char.chars().next().unwrap_or('-');

    header("Vessels");
    let mut vessels = Table::new(
        ["ID", "NAME", "IMO", "TYPE", "FLAG", "CAPACITY", "STATUS", "LAST TREATMENT"],
        sep,
    );
    for v in VESSELS {
        vessels.add_row(vec![
            v.id.to_string(),
            v.name.to_string(),
            v.imo.to_string(),
            v.kind.to_string(),
            v.flag.to_string(),
            v.capacity.to_string(),
            v.status.to_string(),
            v.last_treatment.to_string(),
        ]);
    }
    println!("{}", vessels.render());

    header("Ballast tanks");
    let mut tanks = Table::new(["VALUE", "LABEL"], sep);
    for t in TANKS {
        tanks.add_row(vec![t.value.to_string(), t.label.to_string()]);
    }
    println!("{}", tanks.render());

    header("Dye colors");
    let mut dyes = Table::new(["VALUE", "LABEL"], sep);
    for d in DYE_COLORS {
        dyes.add_row(vec![d.value.to_string(), d.label.to_string()]);
    }
    println!("{}", dyes.render());

    Ok(())
}
