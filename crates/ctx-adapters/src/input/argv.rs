//! Fuente posicional a partir de argv.
use ctx_core::{ContextError, InputSource, Options, RequestData};

/// `data` = argv sin el nombre del programa, indexado por posición.
#[derive(Debug, Clone, Default)]
pub struct ArgvInput {
    args: Option<Vec<String>>,
}

impl ArgvInput {
    /// Lee `std::env::args()` en cada invocación.
    pub fn new() -> Self {
        Self::default()
    }

    /// argv fijo (incluye el nombre del programa en la posición 0).
    pub fn with_args<I, S>(args: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { args: Some(args.into_iter().map(Into::into).collect()) }
    }

    pub(crate) fn argv(&self) -> Vec<String> {
        match &self.args {
            Some(args) => args.clone(),
            None => std::env::args().collect(),
        }
    }
}

impl InputSource for ArgvInput {
    fn has_data(&self, _options: &Options) -> bool {
        self.argv().len() > 1
    }

    fn create_data(&self, _options: &Options) -> Result<RequestData, ContextError> {
        Ok(RequestData::from_values(self.argv().into_iter().skip(1)))
    }
}
