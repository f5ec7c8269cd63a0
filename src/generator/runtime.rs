//! Runtime snippets the generated program depends on.
//!
//! The console polyfill is always emitted. The interop and DOM bridges are
//! emitted only when feature detection finds a node that refers to them.

use crate::dom::DOM_ELEMENTS;

/// `Write` has no newline-free counterpart on `console`, so its text is held
/// until the next `WriteLine`.
pub const CONSOLE_POLYFILL: &str = r#"const Console = {
    __pending: "",
    WriteLine(...args) {
        if (this.__pending === "") {
            console.log(...args);
            return;
        }
        const line = this.__pending + args.map(String).join(" ");
        this.__pending = "";
        console.log(line);
    },
    Write(...args) {
        this.__pending += args.map(String).join(" ");
    },
};
"#;

pub const INTEROP_RUNTIME: &str = r#"const __Interop = {
    unwrap(value) {
        return value !== null && typeof value === "object" && "__element" in value
            ? value.__element
            : value;
    },
    call(path, ...args) {
        const parts = path.split(".");
        let owner = globalThis;
        for (const part of parts.slice(0, -1)) {
            owner = owner[part];
            if (owner === undefined || owner === null) {
                throw new Error(`JS.Call: cannot resolve "${path}"`);
            }
        }
        const target = owner[parts[parts.length - 1]];
        if (typeof target !== "function") {
            throw new Error(`JS.Call: "${path}" is not a function`);
        }
        return target.apply(owner, args.map(__Interop.unwrap));
    },
    set(target, property, value) {
        __Interop.unwrap(target)[property] = __Interop.unwrap(value);
        return value;
    },
};
"#;

const DOM_RUNTIME_HEAD: &str = r#"const __Dom = (() => {
    class DomElement {
        constructor(tag, children) {
            this.__element = document.createElement(tag);
            for (const child of children) {
                this.__element.append(unwrap(child));
            }
        }
    }
    const unwrap = (value) => (value instanceof DomElement ? value.__element : value);
    const element = (tag) =>
        class extends DomElement {
            constructor(...children) {
                super(tag, children);
            }
        };
    return {
        unwrap,
        invoke(target, method, ...args) {
            const receiver = unwrap(target);
            return receiver[method](...args.map(unwrap));
        },
"#;

const DOM_RUNTIME_TAIL: &str = r#"    };
})();
"#;

/// The DOM bridge: one wrapper class per recognized element name.
pub fn dom_runtime() -> String {
    let mut runtime = String::from(DOM_RUNTIME_HEAD);

    for (name, tag) in DOM_ELEMENTS {
        runtime.push_str(&format!("        {}: element(\"{}\"),\n", name, tag));
    }

    runtime.push_str(DOM_RUNTIME_TAIL);
    runtime
}
