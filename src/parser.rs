use std::rc::Rc;

use crate::diagnostics::Diagnostics;
use crate::expr::*;
use crate::literal::Literal;
use crate::stmt::*;
use crate::token::{Token, Type};

/// A parse failure. The message has already been reported to [`Diagnostics`] at the point it was
/// raised — this type only exists so `?` can unwind the recursive-descent call stack up to
/// `declaration`, which synchronizes and resumes.
#[derive(Debug)]
pub struct ParseError;

type ParseResult<T> = Result<T, ParseError>;

const MAX_ARGS: usize = 255;

/// Recursive-descent parser with operator-precedence climbing, grounded in the teacher's
/// structure but built for this language's grammar:
///
/// ```text
/// program     -> declaration* EOF ;
/// declaration -> funDecl | varDecl | statement ;
/// funDecl     -> "fun" IDENTIFIER function ;
/// function    -> "(" parameters? ")" block ;
/// parameters  -> IDENTIFIER ( "," IDENTIFIER )* ;
/// varDecl     -> "var" IDENTIFIER ( "=" expression )? ";" ;
/// statement   -> exprStmt | forStmt | ifStmt | printStmt | returnStmt
///              | breakStmt | continueStmt | whileStmt | block ;
/// exprStmt    -> expression ";" ;
/// forStmt     -> "for" "(" ( varDecl | exprStmt | ";" ) expression? ";" expression? ")" statement ;
/// ifStmt      -> "if" "(" expression ")" statement ( "else" statement )? ;
/// printStmt   -> "print" expression ";" ;
/// returnStmt  -> "return" expression? ";" ;
/// breakStmt   -> "break" ";" ;
/// continueStmt -> "continue" ";" ;
/// whileStmt   -> "while" "(" expression ")" statement ;
/// block       -> "{" declaration* "}" ;
/// expression  -> comma ;
/// comma       -> assignment ( "," assignment )* ;
/// assignment  -> IDENTIFIER ( "=" | "+=" | "-=" | "*=" | "/=" ) assignment | ternary ;
/// ternary     -> logic_or ( "?" expression ":" ternary )? ;
/// logic_or    -> logic_and ( "or" logic_and )* ;
/// logic_and   -> equality ( "and" equality )* ;
/// equality    -> comparison ( ( "!=" | "==" ) comparison )* ;
/// comparison  -> term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
/// term        -> factor ( ( "+" | "-" ) factor )* ;
/// factor      -> unary ( ( "*" | "/" ) unary )* ;
/// unary       -> ( "!" | "-" ) unary | ( "++" | "--" ) unary | postfix ;
/// postfix     -> call ( "++" | "--" | "\\" )* ;
/// call        -> primary ( "(" arguments? ")" )* ;
/// arguments   -> expression ( "," expression )* ;
/// primary     -> NUMBER | STRING | "false" | "true" | "nil" | IDENTIFIER
///              | "(" expression ")" | "fun" "(" parameters? ")" block ;
/// ```
pub struct Parser<'d> {
    tokens: Vec<Token>,
    current: usize,
    next_expr_id: ExprId,
    loop_depth: u32,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> Parser<'d> {
    pub fn new(tokens: Vec<Token>, diagnostics: &'d mut Diagnostics) -> Self {
        Parser { tokens, current: 0, next_expr_id: 0, loop_depth: 0, diagnostics }
    }

    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        statements
    }

    fn next_id(&mut self) -> ExprId {
        let id = self.next_expr_id;
        self.next_expr_id += 1;
        id
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.current + 1)
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().r#type == Type::EOF
    }

    fn check(&self, r#type: Type) -> bool {
        !self.is_at_end() && self.peek().r#type == r#type
    }

    fn check_next(&self, r#type: Type) -> bool {
        matches!(self.peek_next(), Some(token) if token.r#type == r#type)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn matches(&mut self, types: &[Type]) -> bool {
        if types.iter().any(|t| self.check(*t)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, r#type: Type, message: &str) -> ParseResult<Token> {
        if self.check(r#type) {
            return Ok(self.advance().clone());
        }

        let token = self.peek().clone();
        Err(self.error(&token, message))
    }

    /// Reports `message` at `token` and returns the sentinel failure value.
    fn error(&mut self, token: &Token, message: &str) -> ParseError {
        self.diagnostics.error_at(token, message);
        ParseError
    }

    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().r#type == Type::Semicolon {
                return;
            }

            match self.peek().r#type {
                Type::Class
                | Type::Fun
                | Type::Var
                | Type::For
                | Type::If
                | Type::While
                | Type::Print
                | Type::Return
                | Type::Break
                | Type::Continue => return,
                _ => {
                    self.advance();
                }
            };
        }
    }

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.check(Type::Var) {
            self.advance();
            self.var_declaration()
        } else if self.check(Type::Fun) && self.check_next(Type::Identifier) {
            self.advance();
            self.function_declaration("function")
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(ParseError) => {
                self.synchronize();
                None
            }
        }
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect variable name.")?;

        let initializer =
            if self.matches(&[Type::Equal]) { Some(self.expression()?) } else { None };

        self.consume(Type::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    fn function_declaration(&mut self, kind: &str) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, &format!("Expect {kind} name."))?;
        let (params, body) = self.function_tail(kind)?;
        Ok(Stmt::Function(FunctionData { name, params, body: Rc::new(body) }))
    }

    /// Shared by named declarations and anonymous function expressions: `"(" parameters? ")" block`.
    fn function_tail(&mut self, kind: &str) -> ParseResult<(Vec<Token>, Vec<Stmt>)> {
        self.consume(Type::LeftParen, &format!("Expect '(' after {kind} name."))?;

        let mut params = vec![];
        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= MAX_ARGS {
                    let token = self.peek().clone();
                    return Err(self.error(&token, "Cannot have more than 255 parameters."));
                }

                params.push(self.consume(Type::Identifier, "Expect parameter name.")?);

                if !self.matches(&[Type::Comma]) {
                    break;
                }
            }
        }

        self.consume(Type::RightParen, "Expect ')' after parameters.")?;
        self.consume(Type::LeftBrace, &format!("Expect '{{' before {kind} body."))?;

        let body = self.block()?;
        Ok((params, body))
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.matches(&[Type::For]) {
            return self.for_statement();
        }
        if self.matches(&[Type::If]) {
            return self.if_statement();
        }
        if self.matches(&[Type::Print]) {
            return self.print_statement();
        }
        if self.matches(&[Type::Return]) {
            return self.return_statement();
        }
        if self.matches(&[Type::Break, Type::Continue]) {
            return self.interrupt_statement();
        }
        if self.matches(&[Type::While]) {
            return self.while_statement();
        }
        if self.matches(&[Type::LeftBrace]) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }

        self.expression_statement()
    }

    fn interrupt_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        if self.loop_depth == 0 {
            return Err(self.error(&keyword, &format!("Cannot use '{}' outside of a loop.", keyword.lexeme)));
        }

        self.consume(Type::Semicolon, &format!("Expect ';' after '{}'.", keyword.lexeme))?;
        Ok(Stmt::Interrupt(InterruptData { keyword, value: None }))
    }

    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.matches(&[Type::Semicolon]) {
            None
        } else if self.matches(&[Type::Var]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(Type::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(Type::RightParen) { Some(self.expression()?) } else { None };
        self.consume(Type::RightParen, "Expect ')' after loop clauses.")?;

        // The loop depth is incremented around the body only: an increment/condition clause is
        // evaluated outside the loop body proper, but `break`/`continue` inside the body must see
        // this as a loop.
        self.loop_depth += 1;
        let body_result = self.statement();
        self.loop_depth -= 1;
        let body = body_result?;

        let mut body = Stmt::While(WhileData {
            condition: condition.unwrap_or(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Bool(true) })),
            body: Box::new(body),
            increment,
        });

        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData { statements: vec![initializer, body] });
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch =
            if self.matches(&[Type::Else]) { Some(Box::new(self.statement()?)) } else { None };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(PrintData { expr }))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();

        let value = if self.check(Type::Semicolon) { None } else { Some(self.expression()?) };

        self.consume(Type::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Interrupt(InterruptData { keyword, value }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after condition.")?;

        self.loop_depth += 1;
        let body_result = self.statement();
        self.loop_depth -= 1;
        let body = body_result?;

        Ok(Stmt::While(WhileData { condition, body: Box::new(body), increment: None }))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(Type::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.comma()
    }

    fn comma(&mut self) -> ParseResult<Expr> {
        let mut expr = self.assignment()?;

        while self.matches(&[Type::Comma]) {
            let right = self.assignment()?;
            // The comma operator discards `expr` and evaluates to `right`; the evaluator
            // re-derives this from a plain Binary node tagged with the comma token.
            let operator = self.previous().clone();
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.ternary()?;

        if self.matches(&[Type::Equal, Type::PlusEqual, Type::MinusEqual, Type::StarEqual, Type::SlashEqual]) {
            let op = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable(data) => {
                    Ok(Expr::Assign(AssignData { id: self.next_id(), name: data.name, op, value: Box::new(value) }))
                }
                _ => Err(self.error(&op, "Invalid assignment target.")),
            };
        }

        Ok(expr)
    }

    fn ternary(&mut self) -> ParseResult<Expr> {
        let condition = self.or()?;

        if self.matches(&[Type::Question]) {
            let then_branch = self.expression()?;
            self.consume(Type::Colon, "Expect ':' in ternary expression.")?;
            let else_branch = self.ternary()?;

            return Ok(Expr::Ternary(TernaryData {
                id: self.next_id(),
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            }));
        }

        Ok(condition)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while self.matches(&[Type::Or]) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(LogicalData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while self.matches(&[Type::And]) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical(LogicalData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while self.matches(&[Type::BangEqual, Type::EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while self.matches(&[Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual]) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while self.matches(&[Type::Minus, Type::Plus]) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while self.matches(&[Type::Slash, Type::Star]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary(BinaryData { id: self.next_id(), left: Box::new(expr), operator, right: Box::new(right) });
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.matches(&[Type::Bang, Type::Minus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary(UnaryData { id: self.next_id(), operator, expr: Box::new(right) }));
        }

        if self.matches(&[Type::PlusPlus, Type::MinusMinus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;

            if !matches!(right, Expr::Variable(_)) {
                return Err(self.error(&operator, "Invalid increment/decrement target."));
            }

            return Ok(Expr::Unary(UnaryData { id: self.next_id(), operator, expr: Box::new(right) }));
        }

        self.postfix()
    }

    fn postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.call()?;

        loop {
            if self.matches(&[Type::PlusPlus, Type::MinusMinus]) {
                let operator = self.previous().clone();

                if !matches!(expr, Expr::Variable(_)) {
                    return Err(self.error(&operator, "Invalid increment/decrement target."));
                }

                expr = Expr::Postfix(PostfixData { id: self.next_id(), expr: Box::new(expr), operator });

                if self.check(Type::PlusPlus) || self.check(Type::MinusMinus) {
                    let token = self.peek().clone();
                    return Err(self.error(&token, "Cannot chain increment/decrement operators."));
                }
            } else if self.matches(&[Type::Backslash]) {
                let operator = self.previous().clone();
                expr = Expr::Postfix(PostfixData { id: self.next_id(), expr: Box::new(expr), operator });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = vec![];

        if !self.check(Type::RightParen) {
            loop {
                if arguments.len() >= MAX_ARGS {
                    let token = self.peek().clone();
                    return Err(self.error(&token, "Cannot have more than 255 arguments."));
                }

                arguments.push(self.expression_no_comma()?);

                if !self.matches(&[Type::Comma]) {
                    break;
                }
            }
        }

        let paren = self.consume(Type::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call(CallData { id: self.next_id(), callee: Box::new(callee), paren, arguments }))
    }

    /// Argument lists use `,` as a separator, so each argument stops at `assignment` rather than
    /// the full `comma`-including `expression`.
    fn expression_no_comma(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.matches(&[Type::LeftParen]) {
                expr = self.finish_call(expr)?;
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.matches(&[Type::False]) {
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Bool(false) }));
        }
        if self.matches(&[Type::True]) {
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Bool(true) }));
        }
        if self.matches(&[Type::Nil]) {
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Nil }));
        }
        if self.matches(&[Type::Number, Type::String]) {
            let value = self.previous().clone().literal.expect("number or string token to carry a literal");
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value }));
        }
        if self.matches(&[Type::Identifier]) {
            return Ok(Expr::Variable(VariableData { id: self.next_id(), name: self.previous().clone() }));
        }
        if self.matches(&[Type::Fun]) {
            let (params, body) = self.function_tail("function")?;
            return Ok(Expr::Function(FunctionData { id: self.next_id(), params, body: Rc::new(body) }));
        }
        if self.matches(&[Type::LeftParen]) {
            let expr = self.expression()?;
            self.consume(Type::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(GroupingData { id: self.next_id(), expr: Box::new(expr) }));
        }

        // A primary that begins with a binary operator is missing its left operand. Report it
        // without aborting, consume the right-hand side at that operator's own precedence, and
        // stand in a `nil` placeholder so the caller's expression still has a value to build on.
        if self.matches(&[Type::BangEqual, Type::EqualEqual]) {
            let operator = self.previous().clone();
            self.diagnostics.error_at(&operator, "Missing left-hand operand.");
            self.equality()?;
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Nil }));
        }
        if self.matches(&[Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual]) {
            let operator = self.previous().clone();
            self.diagnostics.error_at(&operator, "Missing left-hand operand.");
            self.comparison()?;
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Nil }));
        }
        if self.matches(&[Type::Plus]) {
            let operator = self.previous().clone();
            self.diagnostics.error_at(&operator, "Missing left-hand operand.");
            self.term()?;
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Nil }));
        }
        if self.matches(&[Type::Slash, Type::Star]) {
            let operator = self.previous().clone();
            self.diagnostics.error_at(&operator, "Missing left-hand operand.");
            self.factor()?;
            return Ok(Expr::Literal(LiteralData { id: self.next_id(), value: Literal::Nil }));
        }

        let token = self.peek().clone();
        Err(self.error(&token, "Expect expression."))
    }
}
