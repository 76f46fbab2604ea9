use crate::terminal::colors;
use colored::*;
use pscan_common::network::port::ScanResult;

pub type Detail = (String, ColoredString);

pub fn port_state_to_colored(open: bool) -> ColoredString {
    if open {
        "open".green().bold()
    } else {
        "closed".red()
    }
}

/// Turns a scan result into key/value lines for [`as_tree_one_level`](crate::terminal::print::as_tree_one_level).
pub fn result_to_details(result: &ScanResult) -> Vec<Detail> {
    if !result.resolvable {
        return vec![(String::from("Status"), "Host not found".yellow())];
    }

    if result.port_states.is_empty() {
        return vec![(String::from("Status"), "No ports requested".normal())];
    }

    result
        .port_states
        .iter()
        .map(|state| {
            let key: String = state.port.to_string();
            (key, port_state_to_colored(state.open))
        })
        .collect()
}

pub fn summary_line(results: &[ScanResult], secs: f64) -> ColoredString {
    let open: usize = results.iter().map(|r| r.open_ports().count()).sum();
    let missing: usize = results.iter().filter(|r| !r.resolvable).count();

    let hosts: ColoredString = format!("{} hosts", results.len()).bold().green();
    let open: ColoredString = format!("{open} open ports").bold().color(colors::PORT);
    let total_time: ColoredString = format!("{secs:.2}s").bold().yellow();

    let mut line: String = format!("Scan Complete: {hosts}, {open} in {total_time}");
    if missing > 0 {
        line.push_str(&format!(" ({missing} not found)"));
    }
    line.color(colors::TEXT_DEFAULT)
}
