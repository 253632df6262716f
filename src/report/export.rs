use anyhow::Result;

use crate::report::table::SummaryTable;
use crate::storage::repository::{CountrySelection, DateRange};

/// 將彙總表序列化為 CSV 文字
///
/// 欄位與顯示一致，每桶一列。可選欄缺值時輸出空字串。
pub fn table_to_csv(table: &SummaryTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(&table.columns)?;

    for row in &table.rows {
        let mut record: Vec<String> = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            let cell = match column.as_str() {
                "fecha" => row.fecha.to_string(),
                "pais" => row.pais.clone().unwrap_or_default(),
                "pedidos" => row.pedidos.to_string(),
                "ventas" => row.ventas.to_string(),
                "unidades" => row.unidades.map(|u| u.to_string()).unwrap_or_default(),
                "media_diaria" => row
                    .media_diaria
                    .map(|m| m.to_string())
                    .unwrap_or_default(),
                other => {
                    anyhow::bail!("未知的表格欄位: {}", other);
                }
            };
            record.push(cell);
        }
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// 匯出檔名，依過濾條件與日期範圍參數化
pub fn export_filename(country: &CountrySelection, range: &DateRange) -> String {
    let country_part = match country {
        CountrySelection::All => "todos".to_string(),
        CountrySelection::Only(country) => country.to_lowercase(),
    };
    format!(
        "pedidos_{}_{}_{}.csv",
        country_part, range.start, range.end
    )
}
