use csv::Writer;
use log::info;
use plotters::prelude::*;
use std::collections::BTreeSet;
use std::error::Error;
use std::ffi::OsStr;
use std::path::Path;
use std::{collections::HashMap, path::PathBuf};

use super::eval::EvalResult;

// Logger class for logging training and evaluation data
pub trait Logger {
    // log a piece of data
    fn log(&mut self, data: LogItem);

    // dump everything logged so far
    fn dump(&self) -> Result<(), Box<dyn Error>>;

    // check whether logging is possible. if try_to_fix, the
    // Logger will try to resolve the issue, e.g. by creating
    // the dump directory
    fn check_can_log(&self, try_to_fix: bool) -> Result<(), &str>;

    fn print_last(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogData {
    String(String),
    Float(f32),
    Int(i32),
}

impl LogData {
    fn as_f32(&self) -> Option<f32> {
        match self {
            LogData::String(_) => None,
            LogData::Float(f) => Some(*f),
            LogData::Int(i) => Some(*i as f32),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogItem {
    items: HashMap<String, LogData>,
}

impl LogItem {
    pub fn push(mut self, k: String, v: LogData) -> Self {
        self.items.insert(k, v);

        self
    }

    pub fn get(&self, k: &str) -> Option<&LogData> {
        self.items.get(k)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn print(&self) {
        for (k, v) in &self.items {
            info!("{}: {:?}", k, v);
        }
    }

    pub fn combine(&mut self, other: LogItem) {
        other.items.into_iter().for_each(|(k, v)| {
            self.items.insert(k, v);
        });
    }
}

impl From<EvalResult> for LogItem {
    fn from(value: EvalResult) -> Self {
        LogItem::default()
            .push(
                "eval_ep_mean_len".to_string(),
                LogData::Float(value.mean_len),
            )
            .push(
                "eval_ep_mean_rew".to_string(),
                LogData::Float(value.mean_reward),
            )
            .push(
                "eval_ep_mean_passed".to_string(),
                LogData::Float(value.mean_obstacles_passed),
            )
    }
}

/// Keeps log items in memory and writes them to a csv file on `dump`,
/// with one line chart per numeric column next to it.
pub struct CsvLogger {
    overwrite: bool,
    dump_path: PathBuf,
    to_stdout: bool,
    plot: bool,
    keys: Vec<String>,
    data: Vec<LogItem>,
}

impl CsvLogger {
    pub fn new(dump_path: PathBuf, to_stdout: bool, overwrite: bool) -> Self {
        Self {
            dump_path,
            to_stdout,
            plot: true,
            data: Vec::new(),
            keys: Vec::new(),
            overwrite,
        }
    }

    pub fn with_plots(mut self, plot: bool) -> Self {
        self.plot = plot;

        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Logger for CsvLogger {
    fn log(&mut self, data: LogItem) {
        if self.to_stdout {
            info!("{:?}", data);
        }

        if data.is_empty() {
            return;
        }

        for key in data.items.keys() {
            if !self.keys.contains(key) {
                self.keys.push(key.clone());
            }
        }

        self.data.push(data);
    }

    fn dump(&self) -> Result<(), Box<dyn Error>> {
        info!(
            "Dumping logs to {:?}. {} items to dump",
            self.dump_path,
            self.data.len()
        );

        let mut wtr = Writer::from_path(&self.dump_path)?;

        // sorted so the column order is stable between runs
        let headers: BTreeSet<&String> = self.keys.iter().collect();
        wtr.write_record(&headers)?;

        for record in &self.data {
            let row: Vec<String> = headers
                .iter()
                .map(|key| match record.items.get(*key) {
                    Some(LogData::String(s)) => s.clone(),
                    Some(LogData::Float(f)) => f.to_string(),
                    Some(LogData::Int(i)) => i.to_string(),
                    None => String::new(),
                })
                .collect();
            wtr.write_record(&row)?;
        }

        wtr.flush()?;

        if self.plot {
            if let Some(dir) = self.dump_path.parent() {
                create_plots(&self.data, &self.keys, dir)?;
            }
        }

        Ok(())
    }

    fn check_can_log(&self, try_to_fix: bool) -> Result<(), &str> {
        let parent = match self.dump_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        if self.dump_path.exists() && !self.overwrite {
            Err("logger dump file already exists")
        } else if self.dump_path.extension() != Some(OsStr::new("csv")) {
            Err("logger dump path should be a csv")
        } else if !parent.exists() {
            if try_to_fix {
                std::fs::create_dir_all(parent).map_err(|_| "Couldn't create directory")
            } else {
                Err("logger dump path dir does not exist")
            }
        } else {
            Ok(())
        }
    }

    fn print_last(&self) {
        info!("Last Log:");
        if let Some(log) = self.data.last() {
            for (key, record) in &log.items {
                info!("\t{key}: {:?}", record);
            }
        }
    }
}

/// Draws one `<key>.png` line chart per numeric key into `dir`.
pub fn create_plots(data: &[LogItem], keys: &[String], dir: &Path) -> Result<(), Box<dyn Error>> {
    for yvar in keys {
        let plot_data: Vec<(f32, f32)> = data
            .iter()
            .enumerate()
            .filter_map(|(idx, point)| {
                point
                    .items
                    .get(yvar.as_str())
                    .and_then(LogData::as_f32)
                    .map(|y| (idx as f32, y))
            })
            .collect();

        if plot_data.is_empty() {
            continue;
        }

        let xmax = plot_data.iter().map(|p| p.0).fold(1.0, f32::max);
        let ymin = plot_data.iter().map(|p| p.1).fold(0.0, f32::min);
        let mut ymax = plot_data.iter().map(|p| p.1).fold(f32::MIN, f32::max);
        if ymax <= ymin {
            ymax = ymin + 1.0;
        }

        let path = dir.join(format!("{yvar}.png"));
        let root_area = BitMapBackend::new(&path, (600, 400)).into_drawing_area();
        root_area.fill(&WHITE)?;

        let mut ctx = ChartBuilder::on(&root_area)
            .set_label_area_size(LabelAreaPosition::Left, 40)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .caption(yvar.as_str(), ("sans-serif", 40))
            .build_cartesian_2d(0.0..xmax, ymin..ymax)?;

        ctx.configure_mesh().draw()?;
        ctx.draw_series(LineSeries::new(plot_data, &GREEN))?;
        root_area.present()?;
    }

    Ok(())
}
