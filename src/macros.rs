/// Static [crate::OpInfo] block for an operator
macro_rules! op_info {
    (
        $name: ident,
        name: $op_name: expr,
        n_inputs: $n_inputs: expr,
        n_outputs: $n_outputs: expr,
        differentiable: $differentiable: expr,
    ) => {
        lazy_static::lazy_static! {
            static ref $name: $crate::ops::OpInfo = $crate::ops::OpInfo {
                name: $op_name,
                n_inputs: $n_inputs,
                n_outputs: $n_outputs,
                differentiable: $differentiable,
            };
        }
    };
}
