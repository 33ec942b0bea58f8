#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    ScanStart {
        scan: &'static str,
        total_units: u64,
    },
    UnitFinished {
        start: isize,
        end: isize,
    },
    UnitSkipped {
        start: isize,
        end: isize,
    },
    ScanFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
