use super::Op;
use crate::context::Context;
use crate::errors::GcError;
use crate::runtime::gc::CollectStats;
use crate::runtime::value::{ObjRef, Object};

/// Point-in-time view of a context, as reported by `stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub live: usize,
    pub threshold: usize,
    pub roots: usize,
    pub collections: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Allocated(ObjRef, Object),
    Popped(ObjRef),
    Rooted(ObjRef),
    Shown(ObjRef, Object),
    Updated(ObjRef, Object),
    Collected(CollectStats),
    Stats(Snapshot),
    Roots(Vec<ObjRef>),
}

/// Apply one operation to `ctx`.
pub fn execute(ctx: &mut Context, op: &Op) -> Result<Outcome, GcError> {
    match *op {
        Op::Int(value) => {
            let obj = ctx.push_int(value)?;
            Ok(Outcome::Allocated(obj, *ctx.get(obj)?))
        }
        Op::Pair => {
            let obj = ctx.push_pair()?;
            Ok(Outcome::Allocated(obj, *ctx.get(obj)?))
        }
        Op::Pop => Ok(Outcome::Popped(ctx.pop_root()?)),
        Op::Push(index) => {
            let obj = ctx.resolve(index)?;
            ctx.push_root(obj)?;
            Ok(Outcome::Rooted(obj))
        }
        Op::Show(index) => {
            let obj = ctx.resolve(index)?;
            Ok(Outcome::Shown(obj, *ctx.get(obj)?))
        }
        Op::SetHead(pair, value) => {
            let (pair, value) = (ctx.resolve(pair)?, ctx.resolve(value)?);
            ctx.set_head(pair, value)?;
            Ok(Outcome::Updated(pair, *ctx.get(pair)?))
        }
        Op::SetTail(pair, value) => {
            let (pair, value) = (ctx.resolve(pair)?, ctx.resolve(value)?);
            ctx.set_tail(pair, value)?;
            Ok(Outcome::Updated(pair, *ctx.get(pair)?))
        }
        Op::Collect => Ok(Outcome::Collected(ctx.collect())),
        Op::Stats => Ok(Outcome::Stats(Snapshot {
            live: ctx.live_count(),
            threshold: ctx.threshold(),
            roots: ctx.roots().len(),
            collections: ctx.collections(),
        })),
        Op::Roots => Ok(Outcome::Roots(ctx.roots().to_vec())),
    }
}
