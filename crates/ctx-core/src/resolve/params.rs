//! Resolvedor identidad: devuelve `params` tal cual.
use super::ArgumentResolver;
use crate::errors::ContextError;
use crate::invocation::ContextInvocation;
use crate::model::Value;

/// Sin coerción de tipos. Si `params` está vacío toma los valores
/// posicionales de `data` (claves 0, 1, ... consecutivas).
#[derive(Debug, Default, Clone, Copy)]
pub struct ParamsArgumentResolver;

impl ArgumentResolver for ParamsArgumentResolver {
    fn resolve(&self, invocation: &ContextInvocation) -> Result<Vec<Value>, ContextError> {
        let options = invocation.options();
        let params = options.params()?;
        if !params.is_empty() {
            return Ok(params.to_vec());
        }
        Ok(options.data()?.map(|data| data.positional()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;
    use crate::model::RequestData;
    use crate::options::Options;

    #[test]
    fn params_win_over_data() {
        let options = Options::new().with(constants::PARAMS, vec![Value::from(1)])
                                    .with(constants::DATA, RequestData::from_values([9]));
        let invocation = ContextInvocation::new(options, vec![]);
        assert_eq!(ParamsArgumentResolver.resolve(&invocation), Ok(vec![Value::from(1)]));
    }

    #[test]
    fn empty_params_seed_from_positional_data() {
        let options = Options::new().with(constants::DATA, RequestData::from_values(["a", "b"]));
        let invocation = ContextInvocation::new(options, vec![]);
        assert_eq!(ParamsArgumentResolver.resolve(&invocation), Ok(vec![Value::from("a"), Value::from("b")]));
    }
}
